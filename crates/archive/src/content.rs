//! Per-item content files and course policy documents
//!
//! Extra-content items (tabs, custom tag templates, updates, about pages) are
//! written as one primary text file plus one JSON sidecar per additional
//! content field:
//!
//! ```text
//! tabs/
//! ├── syllabus.html                # `data` field
//! └── syllabus.tab_config.json     # any other explicitly set content field
//! ```

use crate::error::ArchiveResult;
use crate::json::write_sorted_json;
use crate::layout::{GRADING_POLICY_JSON, POLICY_JSON};
use coursepack_core::{ContentNode, FieldValue, Scope, DATA_FIELD, DEFAULT_CONTENT_FIELDS};
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::{Path, PathBuf};

/// Files written for one item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFiles {
    /// Primary content file
    pub primary: PathBuf,
    /// Sidecar field files, in field name order
    pub sidecars: Vec<PathBuf>,
}

/// Write an item's `data` text to `<name><suffix>` and its other content fields as sidecars
///
/// An item without a textual `data` value gets an empty primary file.
pub fn write_item(item_dir: &Path, node: &ContentNode, suffix: &str) -> ArchiveResult<ItemFiles> {
    let primary = item_dir.join(format!("{}{}", node.location.name, suffix));
    let text = node
        .read(DATA_FIELD)
        .and_then(FieldValue::as_str)
        .unwrap_or_default();
    fs::write(&primary, text.as_bytes())?;

    let sidecars = write_field_sidecars(item_dir, node)?;
    Ok(ItemFiles { primary, sidecars })
}

/// Write every explicitly set content field except `data`/`metadata` to `<name>.<field>.json`
pub fn write_field_sidecars(item_dir: &Path, node: &ContentNode) -> ArchiveResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (field_name, value) in node.explicitly_set_fields_by_scope(Scope::Content) {
        if DEFAULT_CONTENT_FIELDS.contains(&field_name.as_str()) {
            continue;
        }
        let path = item_dir.join(format!("{}.{}.json", node.location.name, field_name));
        write_sorted_json(&path, &value.to_json())?;
        written.push(path);
    }
    Ok(written)
}

/// Write `policy.json` and `grading_policy.json` into a run's policy directory
///
/// `policy.json` holds `{"course/<run>": <metadata>}`.
pub fn write_policies(
    run_dir: &Path,
    run_name: &str,
    metadata: Map<String, JsonValue>,
    grading_policy: &JsonValue,
) -> ArchiveResult<()> {
    fs::create_dir_all(run_dir)?;
    write_sorted_json(&run_dir.join(GRADING_POLICY_JSON), grading_policy)?;

    let mut policy = Map::new();
    policy.insert(format!("course/{}", run_name), JsonValue::Object(metadata));
    write_sorted_json(&run_dir.join(POLICY_JSON), &JsonValue::Object(policy))?;
    Ok(())
}

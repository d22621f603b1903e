//! Subtree markup serialization
//!
//! [`SubtreeSerializer`] is the seam between the archive writer and the
//! per-node markup format. The bundled [`XmlSerializer`] writes one file per
//! node into the node's bound export directory:
//!
//! ```text
//! <export_dir>/
//! ├── course/<run>.xml          <course display_name="..."><chapter url_name="ch1"/></course>
//! ├── chapter/ch1.xml           <chapter ...><sequential url_name="s1"/></chapter>
//! └── html/intro.xml            <html display_name="Intro">&lt;p&gt;...</html>
//! ```
//!
//! Settings fields and content fields other than `data`/`metadata` become
//! attributes; `data` becomes the element text.
//!
//! and returns the pointer element that refers to the subtree root
//! (`<course url_name="run" org="..." course="..."/>` for a course).

use crate::error::{ArchiveError, ArchiveResult};
use coursepack_core::{ContentNode, FieldValue, Scope, Subtree, DATA_FIELD, DEFAULT_CONTENT_FIELDS};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

/// Attribute naming a pointed-to node
pub const URL_NAME_ATTR: &str = "url_name";

const COURSE_CATEGORY: &str = "course";

/// Serializes a subtree whose nodes carry a bound export directory
pub trait SubtreeSerializer {
    /// Write every node of `tree` and return the markup pointing at its root
    fn serialize_subtree(&self, tree: &Subtree) -> ArchiveResult<Vec<u8>>;
}

/// One-file-per-node XML serializer
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    indent: usize,
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl XmlSerializer {
    /// Create a serializer with the given indentation width
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    fn write_node(&self, tree: &Subtree) -> ArchiveResult<()> {
        let node = &tree.node;
        let dir = node.export_dir.as_deref().ok_or_else(|| {
            ArchiveError::xml(format!("{} has no export target bound", node.location))
        })?;
        let category_dir = dir.join(node.category());
        fs::create_dir_all(&category_dir)?;

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);
        let mut start = BytesStart::new(node.category());
        for (name, value) in node_attributes(node) {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        let text = data_text(node);
        if tree.children.is_empty() && text.is_none() {
            emit(&mut writer, Event::Empty(start))?;
        } else {
            emit(&mut writer, Event::Start(start))?;
            if let Some(text) = &text {
                emit(&mut writer, Event::Text(BytesText::new(text)))?;
            }
            for child in &tree.children {
                emit(&mut writer, Event::Empty(pointer(&child.node)))?;
            }
            emit(&mut writer, Event::End(BytesEnd::new(node.category())))?;
        }

        let mut out = writer.into_inner();
        out.push(b'\n');
        fs::write(category_dir.join(format!("{}.xml", node.location.name)), &out)?;

        for child in &tree.children {
            self.write_node(child)?;
        }
        Ok(())
    }
}

impl SubtreeSerializer for XmlSerializer {
    fn serialize_subtree(&self, tree: &Subtree) -> ArchiveResult<Vec<u8>> {
        self.write_node(tree)?;

        let mut writer = Writer::new(Vec::new());
        emit(&mut writer, Event::Empty(pointer(&tree.node)))?;
        Ok(writer.into_inner())
    }
}

/// Pointer element referring to a node by name
fn pointer(node: &ContentNode) -> BytesStart<'static> {
    let mut elem = BytesStart::new(node.category().to_string());
    elem.push_attribute((URL_NAME_ATTR, node.location.name.as_str()));
    if node.category() == COURSE_CATEGORY {
        elem.push_attribute(("org", node.location.course_key.org.as_str()));
        elem.push_attribute(("course", node.location.course_key.course.as_str()));
    }
    elem
}

/// Settings fields, content fields other than the body, then xml attributes, sorted by name
fn node_attributes(node: &ContentNode) -> BTreeMap<String, String> {
    let mut attrs: BTreeMap<String, String> = node
        .explicitly_set_fields_by_scope(Scope::Settings)
        .map(|(name, value)| (name.clone(), attribute_text(value)))
        .collect();
    for (name, value) in node.explicitly_set_fields_by_scope(Scope::Content) {
        if !DEFAULT_CONTENT_FIELDS.contains(&name.as_str()) {
            attrs.insert(name.clone(), attribute_text(value));
        }
    }
    for (name, value) in &node.xml_attributes {
        attrs.insert(name.clone(), value.clone());
    }
    attrs
}

/// Strings (including reference URLs) as-is, anything else as compact JSON
fn attribute_text(value: &FieldValue) -> String {
    match value.to_json() {
        JsonValue::String(s) => s,
        other => other.to_string(),
    }
}

fn data_text(node: &ContentNode) -> Option<String> {
    node.field(DATA_FIELD)?.value.as_ref().map(attribute_text)
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> ArchiveResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ArchiveError::xml(e.to_string()))
}

//! Deterministic JSON output
//!
//! Every JSON document in an archive is written with keys sorted at every
//! level and four-space indentation, so identical input yields byte-identical
//! files across runs.

use crate::error::ArchiveResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Rebuild a value with object keys in sorted order at every level
pub fn sort_keys(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            JsonValue::Object(sorted)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Encode a value with sorted keys and four-space indentation
pub fn to_sorted_pretty<T: Serialize>(value: &T) -> ArchiveResult<Vec<u8>> {
    let value = sort_keys(&serde_json::to_value(value)?);
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(out)
}

/// Write a value to `path` as sorted, indented JSON
pub fn write_sorted_json<T: Serialize>(path: &Path, value: &T) -> ArchiveResult<()> {
    fs::write(path, to_sorted_pretty(value)?)?;
    Ok(())
}

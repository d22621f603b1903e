//! Typed node fields
//!
//! A field value is a closed tagged union over the four field kinds. Code that
//! needs to treat references specially matches on [`FieldValue`] instead of
//! inspecting runtime types, so adding a kind is a compile error everywhere it
//! matters.

use crate::types::Location;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Name of the structural children field
pub const CHILDREN_FIELD: &str = "children";

/// Primary content field of leaf items
pub const DATA_FIELD: &str = "data";

/// Content field holding legacy free-form metadata
pub const METADATA_FIELD: &str = "metadata";

/// Content-scope fields that are never written as sidecar files
pub const DEFAULT_CONTENT_FIELDS: [&str; 2] = [METADATA_FIELD, DATA_FIELD];

/// Scope a field belongs to
///
/// Content fields travel with the item body, settings fields become policy
/// metadata, and the children scope holds the structural child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Item body (e.g. `data`, sidecar-exported fields)
    Content,
    /// Settings / policy metadata
    Settings,
    /// Structural child pointers
    Children,
}

/// Discriminant of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Arbitrary JSON value
    Plain,
    /// One reference (possibly empty)
    SingleRef,
    /// Ordered list of references
    RefList,
    /// Keyed map of references
    RefMap,
}

/// Value of a node field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Arbitrary JSON value
    Plain(JsonValue),
    /// One reference; `None` is the empty reference
    SingleRef(Option<Location>),
    /// Ordered list of references
    RefList(Vec<Location>),
    /// Keyed map of references
    RefMap(BTreeMap<String, Location>),
}

impl FieldValue {
    /// Plain string value
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Plain(JsonValue::String(s.into()))
    }

    /// The kind tag of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Plain(_) => FieldKind::Plain,
            FieldValue::SingleRef(_) => FieldKind::SingleRef,
            FieldValue::RefList(_) => FieldKind::RefList,
            FieldValue::RefMap(_) => FieldKind::RefMap,
        }
    }

    /// Borrow the string inside a plain value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Plain(JsonValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Every location held by this value, in field order
    pub fn locations(&self) -> Vec<&Location> {
        match self {
            FieldValue::Plain(_) => Vec::new(),
            FieldValue::SingleRef(loc) => loc.iter().collect(),
            FieldValue::RefList(locs) => locs.iter().collect(),
            FieldValue::RefMap(map) => map.values().collect(),
        }
    }

    /// JSON encoding used in policy and sidecar documents
    ///
    /// References are written in their deprecated URL form.
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Plain(v) => v.clone(),
            FieldValue::SingleRef(None) => JsonValue::Null,
            FieldValue::SingleRef(Some(loc)) => JsonValue::String(loc.to_deprecated_string()),
            FieldValue::RefList(locs) => JsonValue::Array(
                locs.iter()
                    .map(|l| JsonValue::String(l.to_deprecated_string()))
                    .collect(),
            ),
            FieldValue::RefMap(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, l)| (k.clone(), JsonValue::String(l.to_deprecated_string())))
                    .collect(),
            ),
        }
    }
}

/// A field slot on a node: its scope, explicit value and default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Scope of the field
    pub scope: Scope,
    /// Explicitly set value, `None` when the field is defaulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    /// Default value reported while the field is not set
    pub default: FieldValue,
}

impl Field {
    /// An explicitly set field whose default is the null value of its kind
    pub fn set(scope: Scope, value: FieldValue) -> Self {
        let default = match value.kind() {
            FieldKind::Plain => FieldValue::Plain(JsonValue::Null),
            FieldKind::SingleRef => FieldValue::SingleRef(None),
            FieldKind::RefList => FieldValue::RefList(Vec::new()),
            FieldKind::RefMap => FieldValue::RefMap(BTreeMap::new()),
        };
        Self {
            scope,
            value: Some(value),
            default,
        }
    }

    /// A field that is not set and reads as `default`
    pub fn defaulted(scope: Scope, default: FieldValue) -> Self {
        Self {
            scope,
            value: None,
            default,
        }
    }

    /// True if the field holds an explicit value
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Effective value: explicit if set, default otherwise
    pub fn read(&self) -> &FieldValue {
        self.value.as_ref().unwrap_or(&self.default)
    }

    /// True if the effective value equals the default
    pub fn is_default_value(&self) -> bool {
        self.read() == &self.default
    }
}

//! Content nodes and owned subtrees

use crate::field::{Field, FieldValue, Scope, CHILDREN_FIELD};
use crate::types::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One element of a content tree
///
/// Fields are kept in name order so every traversal (adaptation, policy
/// output, serialization) is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Address of the node
    pub location: Location,
    /// Field slots by name
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
    /// Extra attributes emitted verbatim by the serializer
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub xml_attributes: BTreeMap<String, String>,
    /// Directory subsequent serialization of this node writes into
    #[serde(skip)]
    pub export_dir: Option<PathBuf>,
}

impl ContentNode {
    /// Create a node with no fields
    pub fn new(location: Location) -> Self {
        Self {
            location,
            fields: BTreeMap::new(),
            xml_attributes: BTreeMap::new(),
            export_dir: None,
        }
    }

    /// Node category, taken from its location
    pub fn category(&self) -> &str {
        &self.location.category
    }

    /// Set a field explicitly, keeping an existing default
    pub fn set_field(&mut self, name: impl Into<String>, scope: Scope, value: FieldValue) {
        let name = name.into();
        match self.fields.get_mut(&name) {
            Some(field) => {
                field.scope = scope;
                field.value = Some(value);
            }
            None => {
                self.fields.insert(name, Field::set(scope, value));
            }
        }
    }

    /// Declare a defaulted field
    pub fn default_field(&mut self, name: impl Into<String>, scope: Scope, default: FieldValue) {
        self.fields
            .insert(name.into(), Field::defaulted(scope, default));
    }

    /// Builder form of [`ContentNode::set_field`]
    pub fn with_field(mut self, name: impl Into<String>, scope: Scope, value: FieldValue) -> Self {
        self.set_field(name, scope, value);
        self
    }

    /// Builder form of [`ContentNode::default_field`]
    pub fn with_default(mut self, name: impl Into<String>, scope: Scope, default: FieldValue) -> Self {
        self.default_field(name, scope, default);
        self
    }

    /// Builder setting the children field
    pub fn with_children(self, children: Vec<Location>) -> Self {
        self.with_field(CHILDREN_FIELD, Scope::Children, FieldValue::RefList(children))
    }

    /// Field slot by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Effective value of a field (explicit or default)
    pub fn read(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).map(Field::read)
    }

    /// Ordered child locations (empty when the field is absent or not a list)
    pub fn children(&self) -> &[Location] {
        match self.read(CHILDREN_FIELD) {
            Some(FieldValue::RefList(children)) => children,
            _ => &[],
        }
    }

    /// Explicitly set fields, in name order
    pub fn explicitly_set_fields(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields
            .iter()
            .filter_map(|(name, field)| field.value.as_ref().map(|v| (name, v)))
    }

    /// Explicitly set fields of one scope
    pub fn explicitly_set_fields_by_scope(
        &self,
        scope: Scope,
    ) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields
            .iter()
            .filter(move |(_, field)| field.scope == scope)
            .filter_map(|(name, field)| field.value.as_ref().map(|v| (name, v)))
    }

    /// Settings-scope metadata explicitly set on this node, JSON encoded
    pub fn own_metadata(&self) -> serde_json::Map<String, serde_json::Value> {
        self.explicitly_set_fields_by_scope(Scope::Settings)
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}

/// A node together with its resolved children
///
/// Subtrees are built by the tree store and owned by the caller. A node that
/// appears under two parents is materialized twice, so a walk that mutates a
/// subtree never touches the same value through two paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    /// The root node
    pub node: ContentNode,
    /// Children in the order of the node's children field
    pub children: Vec<Subtree>,
}

impl Subtree {
    /// A subtree with no children
    pub fn leaf(node: ContentNode) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Subtree::len).sum::<usize>()
    }

    /// Always false; a subtree holds at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Nodes in pre-order
    pub fn nodes(&self) -> Vec<&ContentNode> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            out.push(&tree.node);
            stack.extend(tree.children.iter().rev());
        }
        out
    }

    /// Find a node by location
    pub fn find(&self, location: &Location) -> Option<&ContentNode> {
        self.nodes().into_iter().find(|n| &n.location == location)
    }
}

impl From<ContentNode> for Subtree {
    fn from(node: ContentNode) -> Self {
        Subtree::leaf(node)
    }
}

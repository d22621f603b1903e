//! Core types and traits for Coursepack
//!
//! This crate defines the foundational types used throughout the system:
//! - CourseKey: Namespace of a course (org/course/run + qualifiers)
//! - Location: Composite key of a content node
//! - FieldValue / FieldKind: Tagged union of field kinds (plain, references)
//! - ContentNode / Subtree: Content nodes and owned subtrees
//! - Error: Error type hierarchy
//! - Traits: Collaborator contracts (TreeStore, AssetStore)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod node;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use field::{
    Field, FieldKind, FieldValue, Scope, CHILDREN_FIELD, DATA_FIELD, DEFAULT_CONTENT_FIELDS,
    METADATA_FIELD,
};
pub use node::{ContentNode, Subtree};
pub use traits::{Asset, AssetStore, Branch, CategoryFilter, ItemQuery, Revision, TreeStore};
pub use types::{CourseKey, Location, ASSET_CATEGORY};

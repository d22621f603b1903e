//! Collaborator traits
//!
//! The exporter reads content through these narrow contracts:
//! - TreeStore: the system of record for course trees, revisions and branches
//! - AssetStore: static binary assets attached to a course

use crate::error::Result;
use crate::node::{ContentNode, Subtree};
use crate::types::{CourseKey, Location};
use std::path::Path;

/// Which revision of the tree a read observes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Only published revisions are visible
    PublishedOnly,
    /// Draft revisions shadow published ones where both exist
    DraftPreferred,
}

/// Revision filter for item queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Revision {
    /// Whatever the branch view returns
    #[default]
    Any,
    /// Only items that have a draft revision
    DraftOnly,
}

/// Category filter for item queries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    Any,
    /// Exactly this category
    Is(String),
    /// Any category except these
    NotIn(Vec<String>),
}

impl CategoryFilter {
    /// True if `category` passes the filter
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Is(c) => c == category,
            CategoryFilter::NotIn(excluded) => !excluded.iter().any(|c| c == category),
        }
    }
}

/// Query for [`TreeStore::get_items`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemQuery {
    /// Category filter
    pub category: CategoryFilter,
    /// Revision filter
    pub revision: Revision,
}

impl ItemQuery {
    /// Items of one category
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: CategoryFilter::Is(category.into()),
            revision: Revision::Any,
        }
    }

    /// Draft-only items outside the excluded categories
    pub fn drafts_excluding(excluded: Vec<String>) -> Self {
        Self {
            category: CategoryFilter::NotIn(excluded),
            revision: Revision::DraftOnly,
        }
    }
}

/// Source of course content
///
/// Implementations must present one consistent snapshot between
/// [`TreeStore::begin_bulk_operation`] and [`TreeStore::end_bulk_operation`];
/// callers perform no locking of their own.
pub trait TreeStore {
    /// Load a course tree. `depth = None` loads every level.
    fn get_course(&self, key: &CourseKey, depth: Option<usize>, branch: Branch) -> Result<Subtree>;

    /// Items of a course matching `query`
    fn get_items(&self, key: &CourseKey, query: &ItemQuery, branch: Branch) -> Result<Vec<ContentNode>>;

    /// Parent of a location, `None` for roots and orphans
    fn get_parent_location(&self, location: &Location, branch: Branch) -> Result<Option<Location>>;

    /// One item
    fn get_item(&self, location: &Location, branch: Branch) -> Result<ContentNode>;

    /// An item with every descendant
    fn get_subtree(&self, location: &Location, branch: Branch) -> Result<Subtree>;

    /// True if the store keeps draft revisions apart from published ones
    fn supports_drafts(&self) -> bool;

    /// Start a bulk operation on a course
    fn begin_bulk_operation(&self, _key: &CourseKey) {}

    /// End a bulk operation on a course
    fn end_bulk_operation(&self, _key: &CourseKey) {}
}

/// A static asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Asset location (category `asset`)
    pub location: Location,
    /// MIME type
    pub content_type: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

/// Source of static assets
pub trait AssetStore {
    /// Write every asset of a course under `static_dir` and its manifest to `manifest_path`
    fn export_all_for_course(&self, key: &CourseKey, static_dir: &Path, manifest_path: &Path) -> Result<()>;

    /// Find one asset; fails with [`crate::Error::NotFound`] when absent
    fn find(&self, location: &Location) -> Result<Asset>;
}

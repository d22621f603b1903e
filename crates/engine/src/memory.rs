//! In-memory tree and asset stores
//!
//! Reference implementations of [`TreeStore`] and [`AssetStore`] backed by
//! maps behind a `parking_lot::RwLock`. The tree store keeps two revision
//! maps; under [`Branch::DraftPreferred`] a draft revision shadows the
//! published one at the same location.
//!
//! Both stores round-trip through a JSON [`Snapshot`] so that a course can be
//! exported from a file.

use coursepack_archive::write_sorted_json;
use coursepack_core::{
    Asset, AssetStore, Branch, ContentNode, CourseKey, Error, ItemQuery, Location, Result,
    Revision, Subtree, TreeStore,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

const COURSE_CATEGORY: &str = "course";

// ============================================================================
// Snapshot
// ============================================================================

/// Serialized form of a tree store and its assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Whether draft revisions are kept apart from published ones
    #[serde(default = "default_supports_drafts")]
    pub supports_drafts: bool,
    /// Published revisions
    #[serde(default)]
    pub published: Vec<ContentNode>,
    /// Draft revisions
    #[serde(default)]
    pub drafts: Vec<ContentNode>,
    /// Static assets
    #[serde(default)]
    pub assets: Vec<SnapshotAsset>,
}

fn default_supports_drafts() -> bool {
    true
}

/// One static asset in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotAsset {
    /// Course the asset belongs to
    pub course_key: CourseKey,
    /// Path under the static directory (e.g. `images/logo.png`)
    pub path: String,
    /// MIME type
    pub content_type: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write a snapshot as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}

// ============================================================================
// Tree store
// ============================================================================

#[derive(Debug, Default)]
struct Revisions {
    published: BTreeMap<Location, ContentNode>,
    drafts: BTreeMap<Location, ContentNode>,
}

impl Revisions {
    fn lookup(&self, location: &Location, branch: Branch) -> Option<&ContentNode> {
        match branch {
            Branch::PublishedOnly => self.published.get(location),
            Branch::DraftPreferred => self
                .drafts
                .get(location)
                .or_else(|| self.published.get(location)),
        }
    }

    /// Every node visible under `branch`, in location order
    fn view(&self, branch: Branch) -> Vec<&ContentNode> {
        match branch {
            Branch::PublishedOnly => self.published.values().collect(),
            Branch::DraftPreferred => {
                let mut merged: BTreeMap<&Location, &ContentNode> =
                    self.published.iter().collect();
                merged.extend(self.drafts.iter());
                merged.into_values().collect()
            }
        }
    }

    fn build(
        &self,
        location: &Location,
        branch: Branch,
        depth: Option<usize>,
        visiting: &mut HashSet<Location>,
    ) -> Option<Subtree> {
        let node = self.lookup(location, branch)?.clone();
        let mut tree = Subtree::leaf(node);
        if depth == Some(0) || !visiting.insert(location.clone()) {
            return Some(tree);
        }

        let next = depth.map(|d| d - 1);
        for child in tree.node.children().to_vec() {
            if visiting.contains(&child) {
                debug!(target: "coursepack::memory", child = %child, "Skipping cyclic child");
                continue;
            }
            match self.build(&child, branch, next, visiting) {
                Some(subtree) => tree.children.push(subtree),
                None => debug!(target: "coursepack::memory", child = %child, "Skipping missing child"),
            }
        }
        visiting.remove(location);
        Some(tree)
    }
}

fn same_course(location: &Location, key: &CourseKey) -> bool {
    location.course_key.version_agnostic() == key.version_agnostic()
}

/// Tree store holding published and draft revisions in memory
#[derive(Debug)]
pub struct MemoryTreeStore {
    revisions: RwLock<Revisions>,
    supports_drafts: bool,
    bulk_depth: AtomicUsize,
}

impl Default for MemoryTreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTreeStore {
    /// Empty store with draft support
    pub fn new() -> Self {
        Self::with_draft_support(true)
    }

    /// Empty store; without draft support every insert lands in the published map
    pub fn with_draft_support(supports_drafts: bool) -> Self {
        Self {
            revisions: RwLock::new(Revisions::default()),
            supports_drafts,
            bulk_depth: AtomicUsize::new(0),
        }
    }

    /// Build a store from a snapshot
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let store = Self::with_draft_support(snapshot.supports_drafts);
        for node in &snapshot.published {
            store.insert_published(node.clone());
        }
        for node in &snapshot.drafts {
            store.insert_draft(node.clone());
        }
        store
    }

    /// Current contents as a snapshot (without assets)
    pub fn snapshot(&self) -> Snapshot {
        let revisions = self.revisions.read();
        Snapshot {
            supports_drafts: self.supports_drafts,
            published: revisions.published.values().cloned().collect(),
            drafts: revisions.drafts.values().cloned().collect(),
            assets: Vec::new(),
        }
    }

    /// Insert or replace a published revision
    pub fn insert_published(&self, node: ContentNode) {
        self.revisions
            .write()
            .published
            .insert(node.location.clone(), node);
    }

    /// Insert or replace a draft revision
    pub fn insert_draft(&self, node: ContentNode) {
        let mut revisions = self.revisions.write();
        if self.supports_drafts {
            revisions.drafts.insert(node.location.clone(), node);
        } else {
            revisions.published.insert(node.location.clone(), node);
        }
    }

    /// Number of bulk operations currently open
    pub fn bulk_depth(&self) -> usize {
        self.bulk_depth.load(Ordering::SeqCst)
    }
}

impl TreeStore for MemoryTreeStore {
    fn get_course(&self, key: &CourseKey, depth: Option<usize>, branch: Branch) -> Result<Subtree> {
        let revisions = self.revisions.read();
        let root = revisions
            .view(branch)
            .into_iter()
            .find(|n| n.category() == COURSE_CATEGORY && same_course(&n.location, key))
            .map(|n| n.location.clone())
            .ok_or_else(|| Error::NotFound(format!("course {}", key)))?;

        revisions
            .build(&root, branch, depth, &mut HashSet::new())
            .ok_or_else(|| Error::item_not_found(&root))
    }

    fn get_items(&self, key: &CourseKey, query: &ItemQuery, branch: Branch) -> Result<Vec<ContentNode>> {
        let revisions = self.revisions.read();
        let candidates: Vec<&ContentNode> = match query.revision {
            Revision::Any => revisions.view(branch),
            Revision::DraftOnly => match branch {
                Branch::PublishedOnly => Vec::new(),
                Branch::DraftPreferred => revisions.drafts.values().collect(),
            },
        };
        Ok(candidates
            .into_iter()
            .filter(|n| same_course(&n.location, key) && query.category.matches(n.category()))
            .cloned()
            .collect())
    }

    fn get_parent_location(&self, location: &Location, branch: Branch) -> Result<Option<Location>> {
        let revisions = self.revisions.read();
        Ok(revisions
            .view(branch)
            .into_iter()
            .find(|n| n.children().contains(location))
            .map(|n| n.location.clone()))
    }

    fn get_item(&self, location: &Location, branch: Branch) -> Result<ContentNode> {
        self.revisions
            .read()
            .lookup(location, branch)
            .cloned()
            .ok_or_else(|| Error::item_not_found(location))
    }

    fn get_subtree(&self, location: &Location, branch: Branch) -> Result<Subtree> {
        self.revisions
            .read()
            .build(location, branch, None, &mut HashSet::new())
            .ok_or_else(|| Error::item_not_found(location))
    }

    fn supports_drafts(&self) -> bool {
        self.supports_drafts
    }

    fn begin_bulk_operation(&self, key: &CourseKey) {
        let depth = self.bulk_depth.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(target: "coursepack::memory", course = %key, depth, "Bulk operation started");
    }

    fn end_bulk_operation(&self, key: &CourseKey) {
        let depth = self.bulk_depth.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!(target: "coursepack::memory", course = %key, depth, "Bulk operation ended");
    }
}

// ============================================================================
// Asset store
// ============================================================================

#[derive(Debug, Clone)]
struct StoredAsset {
    path: String,
    asset: Asset,
}

/// Asset store holding static files in memory
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    assets: RwLock<BTreeMap<Location, StoredAsset>>,
}

impl MemoryAssetStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot's assets
    ///
    /// # Errors
    ///
    /// Fails if two snapshot assets flatten to the same asset name.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let store = Self::new();
        for asset in &snapshot.assets {
            store.insert(
                &asset.course_key,
                &asset.path,
                &asset.content_type,
                asset.data.clone(),
            )?;
        }
        Ok(store)
    }

    /// Add an asset at `path` under the course's static directory
    ///
    /// Assets are addressed by the version-agnostic course key. Inserting the
    /// same path again replaces the asset.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if a different path already flattens to the same
    /// asset name (`images/logo.png` and `images_logo.png`).
    pub fn insert(&self, key: &CourseKey, path: &str, content_type: &str, data: Vec<u8>) -> Result<Location> {
        let location = Location::asset(&key.version_agnostic(), path);
        let path = path.trim_start_matches('/').to_string();

        let mut assets = self.assets.write();
        if let Some(existing) = assets.get(&location) {
            if existing.path != path {
                return Err(Error::InvalidOperation(format!(
                    "asset path {} collides with {} as {}",
                    path, existing.path, location
                )));
            }
        }
        let stored = StoredAsset {
            path,
            asset: Asset {
                location: location.clone(),
                content_type: content_type.to_string(),
                data,
            },
        };
        assets.insert(location.clone(), stored);
        Ok(location)
    }

    /// Number of stored assets
    pub fn len(&self) -> usize {
        self.assets.read().len()
    }

    /// True if no assets are stored
    pub fn is_empty(&self) -> bool {
        self.assets.read().is_empty()
    }
}

impl AssetStore for MemoryAssetStore {
    fn export_all_for_course(&self, key: &CourseKey, static_dir: &Path, manifest_path: &Path) -> Result<()> {
        let assets = self.assets.read();
        let mut manifest = Map::new();

        for stored in assets.values().filter(|s| same_course(&s.asset.location, key)) {
            let target = static_dir.join(&stored.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &stored.asset.data)?;
            manifest.insert(
                stored.asset.location.name.clone(),
                json!({
                    "content_type": stored.asset.content_type,
                    "path": stored.path,
                    "size": stored.asset.data.len(),
                }),
            );
        }

        if let Some(parent) = manifest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_sorted_json(manifest_path, &manifest).map_err(|e| Error::Store(e.to_string()))?;
        debug!(target: "coursepack::memory", course = %key, assets = manifest.len(), "Assets exported");
        Ok(())
    }

    fn find(&self, location: &Location) -> Result<Asset> {
        let location = location.map_into_course(&location.course_key.version_agnostic());
        self.assets
            .read()
            .get(&location)
            .map(|s| s.asset.clone())
            .ok_or_else(|| Error::item_not_found(&location))
    }
}

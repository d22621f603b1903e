//! Course export
//!
//! Writes one course from a tree store into a version 0 archive directory.
//! The export runs in this order, all under a single bulk operation on the
//! store:
//!
//! 1. course tree → `course.xml` and per-node markup
//! 2. static assets and the legacy default course image
//! 3. extra content (tabs, custom tags, updates, about pages)
//! 4. course policies
//! 5. draft subtrees → `drafts/`
//!
//! There is no cleanup on failure; a partially written directory is left
//! for the caller to discard.

use crate::adapter::adapt_references;
use crate::config::ExportConfig;
use crate::drafts::{resolve_roots, DraftNode};
use coursepack_archive::{
    write_item, write_policies, ArchivePaths, ArchiveResult, SubtreeSerializer, XmlSerializer,
};
use coursepack_core::{
    AssetStore, Branch, ContentNode, CourseKey, Error, FieldValue, ItemQuery, Location, Subtree,
    TreeStore,
};
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// =============================================================================
// Constants
// =============================================================================

/// Course field naming the course image asset
pub const COURSE_IMAGE_FIELD: &str = "course_image";

/// Course field holding the grading policy
pub const GRADING_POLICY_FIELD: &str = "grading_policy";

/// Xml attribute recording the parent of an exported draft root
pub const PARENT_URL_ATTR: &str = "parent_url";

/// Xml attribute recording the position of a draft root among its siblings
pub const INDEX_IN_CHILDREN_ATTR: &str = "index_in_children_list";

/// Extra content categories: (category, directory, file suffix)
pub const EXTRA_CONTENT: [(&str, &str, &str); 4] = [
    ("static_tab", "tabs", ".html"),
    ("custom_tag_template", "custom_tags", ""),
    ("course_info", "info", ".html"),
    ("about", "about", ".html"),
];

// =============================================================================
// Public result types
// =============================================================================

/// Information returned after exporting a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportInfo {
    /// Course directory written
    pub path: PathBuf,
    /// Key of the exported course
    pub course_key: CourseKey,
    /// Nodes in the published course tree
    pub published_nodes: usize,
    /// Extra content items written
    pub extra_items: usize,
    /// Draft nodes with a resolvable parent
    pub draft_nodes: usize,
    /// Draft subtrees written
    pub draft_roots: usize,
    /// Draft nodes dropped for lack of a parent
    pub orphans_skipped: usize,
}

// =============================================================================
// Bulk operation scope
// =============================================================================

/// Keeps a bulk operation open on the store until dropped
struct BulkOperation<'a, S: TreeStore + ?Sized> {
    store: &'a S,
    key: &'a CourseKey,
}

impl<'a, S: TreeStore + ?Sized> BulkOperation<'a, S> {
    fn begin(store: &'a S, key: &'a CourseKey) -> Self {
        store.begin_bulk_operation(key);
        Self { store, key }
    }
}

impl<S: TreeStore + ?Sized> Drop for BulkOperation<'_, S> {
    fn drop(&mut self) {
        self.store.end_bulk_operation(self.key);
    }
}

// =============================================================================
// Export
// =============================================================================

/// Export a course to `root_dir/course_dir` with the default configuration
/// and XML serializer
///
/// See [`export_course_with`].
pub fn export_course<S: TreeStore + ?Sized>(
    store: &S,
    assets: Option<&dyn AssetStore>,
    course_key: &CourseKey,
    root_dir: &Path,
    course_dir: &str,
) -> ArchiveResult<ExportInfo> {
    export_course_with(
        store,
        assets,
        course_key,
        root_dir,
        course_dir,
        &ExportConfig::default(),
        &XmlSerializer::default(),
    )
}

/// Export a course to `root_dir/course_dir`
///
/// All references are rewritten into the version-agnostic form of
/// `course_key`. Draft nodes are exported only when the store keeps drafts;
/// drafts of the configured direct-only categories are never exported.
///
/// # Errors
///
/// Store and I/O failures propagate unchanged. A missing default course image
/// and draft nodes without a parent are skipped, not reported.
pub fn export_course_with<S: TreeStore + ?Sized>(
    store: &S,
    assets: Option<&dyn AssetStore>,
    course_key: &CourseKey,
    root_dir: &Path,
    course_dir: &str,
    config: &ExportConfig,
    serializer: &dyn SubtreeSerializer,
) -> ArchiveResult<ExportInfo> {
    let _bulk = BulkOperation::begin(store, course_key);

    let paths = ArchivePaths::from_root(root_dir.join(course_dir));
    info!(
        target: "coursepack::export",
        course = %course_key,
        path = %paths.root().display(),
        "Export started"
    );
    fs::create_dir_all(paths.root())?;
    let destination = course_key.version_agnostic();

    // Course tree
    let mut course = store.get_course(course_key, None, Branch::PublishedOnly)?;
    adapt_references(&mut course, &destination, paths.root());
    let mut markup = serializer.serialize_subtree(&course)?;
    markup.push(b'\n');
    fs::write(paths.course_xml(), markup)?;

    // Static assets
    if let Some(assets) = assets {
        fs::create_dir_all(paths.policies_dir())?;
        assets.export_all_for_course(course_key, &paths.static_dir(), &paths.assets_manifest())?;
        copy_default_course_image(
            assets,
            &course.node,
            course_key,
            &paths.root().join(&config.legacy_course_image),
        )?;
    }

    let extra_items = export_extra_content(store, course_key, &destination, &paths)?;

    // Policies
    let run_name = course.node.location.name.clone();
    let grading_policy = course
        .node
        .read(GRADING_POLICY_FIELD)
        .map(FieldValue::to_json)
        .filter(|v| !v.is_null())
        .unwrap_or_else(|| JsonValue::Object(Map::new()));
    write_policies(
        &paths.run_policy_dir(&run_name),
        &run_name,
        course.node.own_metadata(),
        &grading_policy,
    )?;

    let drafts = if store.supports_drafts() {
        export_drafts(store, course_key, &destination, &paths, config, serializer)?
    } else {
        DraftCounts::default()
    };

    let info = ExportInfo {
        path: paths.root().to_path_buf(),
        course_key: course_key.clone(),
        published_nodes: course.len(),
        extra_items,
        draft_nodes: drafts.nodes,
        draft_roots: drafts.roots,
        orphans_skipped: drafts.orphans,
    };
    info!(
        target: "coursepack::export",
        course = %course_key,
        published_nodes = info.published_nodes,
        extra_items = info.extra_items,
        draft_roots = info.draft_roots,
        orphans_skipped = info.orphans_skipped,
        "Export finished"
    );
    Ok(info)
}

/// Copy the course's default image to its legacy path
///
/// Only done while the course still uses the default image value. An image
/// that is not in the asset store is skipped.
fn copy_default_course_image(
    assets: &dyn AssetStore,
    course: &ContentNode,
    course_key: &CourseKey,
    target: &Path,
) -> ArchiveResult<()> {
    let Some(field) = course.field(COURSE_IMAGE_FIELD) else {
        return Ok(());
    };
    let Some(image) = field.read().as_str().filter(|_| field.is_default_value()) else {
        return Ok(());
    };

    match assets.find(&Location::asset(course_key, image)) {
        Ok(asset) => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, &asset.data)?;
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            debug!(
                target: "coursepack::export",
                course = %course_key,
                image,
                "Default course image not in asset store, skipped"
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn export_extra_content<S: TreeStore + ?Sized>(
    store: &S,
    course_key: &CourseKey,
    destination: &CourseKey,
    paths: &ArchivePaths,
) -> ArchiveResult<usize> {
    let mut written = 0;
    for (category, dirname, suffix) in EXTRA_CONTENT {
        let items = store.get_items(course_key, &ItemQuery::category(category), Branch::DraftPreferred)?;
        if items.is_empty() {
            continue;
        }
        let item_dir = paths.root().join(dirname);
        fs::create_dir_all(&item_dir)?;

        for item in items {
            let mut tree = Subtree::leaf(item);
            adapt_references(&mut tree, destination, paths.root());
            write_item(&item_dir, &tree.node, suffix)?;
            written += 1;
        }
    }
    Ok(written)
}

#[derive(Debug, Default)]
struct DraftCounts {
    nodes: usize,
    roots: usize,
    orphans: usize,
}

fn export_drafts<S: TreeStore + ?Sized>(
    store: &S,
    course_key: &CourseKey,
    destination: &CourseKey,
    paths: &ArchivePaths,
    config: &ExportConfig,
    serializer: &dyn SubtreeSerializer,
) -> ArchiveResult<DraftCounts> {
    let query = ItemQuery::drafts_excluding(config.direct_only_categories.clone());
    let items = store.get_items(course_key, &query, Branch::DraftPreferred)?;
    let mut counts = DraftCounts::default();
    if items.is_empty() {
        return Ok(counts);
    }

    let drafts_dir = paths.drafts_dir();
    fs::create_dir_all(&drafts_dir)?;

    let mut candidates = Vec::with_capacity(items.len());
    for node in items {
        match store.get_parent_location(&node.location, Branch::DraftPreferred)? {
            Some(parent) => candidates.push(DraftNode::new(node, parent)),
            None => {
                debug!(
                    target: "coursepack::export",
                    location = %node.location,
                    "Skipping orphaned draft"
                );
                counts.orphans += 1;
            }
        }
    }
    counts.nodes = candidates.len();

    let roots = resolve_roots(candidates, |location| {
        store.get_parent_location(location, Branch::DraftPreferred)
    })?;
    for root in &roots {
        export_draft_root(store, root, destination, &drafts_dir, serializer)?;
    }
    counts.roots = roots.len();
    Ok(counts)
}

fn export_draft_root<S: TreeStore + ?Sized>(
    store: &S,
    root: &DraftNode,
    destination: &CourseKey,
    drafts_dir: &Path,
    serializer: &dyn SubtreeSerializer,
) -> ArchiveResult<()> {
    let parent = store.get_item(&root.parent_location, Branch::DraftPreferred)?;
    let index = parent
        .children()
        .iter()
        .position(|child| child == &root.location)
        .ok_or_else(|| {
            Error::Corruption(format!(
                "{} is not listed among the children of its parent {}",
                root.url, root.parent_url
            ))
        })?;

    let mut tree = store.get_subtree(&root.location, Branch::DraftPreferred)?;
    tree.node
        .xml_attributes
        .insert(PARENT_URL_ATTR.to_string(), root.parent_url.clone());
    tree.node
        .xml_attributes
        .insert(INDEX_IN_CHILDREN_ATTR.to_string(), index.to_string());
    adapt_references(&mut tree, destination, drafts_dir);
    serializer.serialize_subtree(&tree)?;
    Ok(())
}

//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use coursepack::{
    ContentNode, CourseKey, FieldValue, Location, MemoryAssetStore, MemoryTreeStore, Scope,
};
use serde_json::{json, Value as JsonValue};

// ============================================================================
// Demo course
// ============================================================================

/// Key the demo course is exported under
pub fn key() -> CourseKey {
    CourseKey::new("edX", "DemoX", "2024")
}

/// Key the demo course's nodes are stored under
pub fn stored_key() -> CourseKey {
    key().for_branch("draft-branch")
}

/// A namespace referenced from inside the demo course
pub fn foreign_key() -> CourseKey {
    CourseKey::new("MITx", "6.002x", "2013").for_version("5f1a")
}

/// Location in the stored namespace
pub fn loc(category: &str, name: &str) -> Location {
    stored_key().make_location(category, name)
}

/// Demo course:
///
/// ```text
/// course 2024
/// └── chapter ch1
///     └── sequential s1
///         ├── vertical v1 [draft]
///         │   ├── html h1 [draft]
///         │   └── problem p1
///         ├── vertical v2
///         └── vertical v3 [draft only]
/// ```
///
/// plus one orphaned draft (`html loose`), a draft of a direct-only chapter,
/// a static tab, a course update and an about page.
pub fn demo_store() -> MemoryTreeStore {
    let store = MemoryTreeStore::new();
    for node in published_nodes() {
        store.insert_published(node);
    }
    for node in draft_nodes() {
        store.insert_draft(node);
    }
    store
}

/// Published revisions of the demo course
pub fn published_nodes() -> Vec<ContentNode> {
    vec![
        ContentNode::new(loc("course", "2024"))
            .with_field("display_name", Scope::Settings, FieldValue::text("Demo Course"))
            .with_field("start", Scope::Settings, FieldValue::text("2024-01-15T00:00:00Z"))
            .with_field(
                "advanced_modules",
                Scope::Settings,
                FieldValue::Plain(json!(["poll", "annotatable"])),
            )
            .with_default("course_image", Scope::Settings, FieldValue::text("images_course_image.jpg"))
            .with_field(
                "grading_policy",
                Scope::Content,
                FieldValue::Plain(json!({
                    "GRADER": [{"type": "Homework", "weight": 0.4, "min_count": 5}],
                    "GRADE_CUTOFFS": {"Pass": 0.5}
                })),
            )
            .with_children(vec![loc("chapter", "ch1")]),
        ContentNode::new(loc("chapter", "ch1"))
            .with_field("display_name", Scope::Settings, FieldValue::text("Week 1"))
            .with_children(vec![loc("sequential", "s1")]),
        ContentNode::new(loc("sequential", "s1"))
            .with_field("display_name", Scope::Settings, FieldValue::text("Lesson"))
            .with_children(vec![loc("vertical", "v1"), loc("vertical", "v2"), loc("vertical", "v3")]),
        ContentNode::new(loc("vertical", "v1")).with_children(vec![loc("html", "h1"), loc("problem", "p1")]),
        ContentNode::new(loc("vertical", "v2")),
        ContentNode::new(loc("html", "h1")).with_field("data", Scope::Content, FieldValue::text("<p>Hello</p>")),
        ContentNode::new(loc("problem", "p1"))
            .with_field(
                "source",
                Scope::Settings,
                FieldValue::SingleRef(Some(foreign_key().make_location("html", "shared"))),
            )
            .with_field(
                "related",
                Scope::Content,
                FieldValue::RefList(vec![loc("html", "h1"), foreign_key().make_location("html", "x")]),
            ),
        ContentNode::new(loc("static_tab", "syllabus"))
            .with_field("data", Scope::Content, FieldValue::text("<h1>Syllabus</h1>"))
            .with_field("tab_config", Scope::Content, FieldValue::Plain(json!({"position": 3})))
            .with_field("display_name", Scope::Settings, FieldValue::text("Syllabus")),
        ContentNode::new(loc("course_info", "updates"))
            .with_field("data", Scope::Content, FieldValue::text("<ol><li>Welcome</li></ol>")),
        ContentNode::new(loc("about", "overview"))
            .with_field("data", Scope::Content, FieldValue::text("<section>About</section>")),
    ]
}

/// Draft revisions of the demo course
pub fn draft_nodes() -> Vec<ContentNode> {
    vec![
        ContentNode::new(loc("vertical", "v1"))
            .with_field("display_name", Scope::Settings, FieldValue::text("Unit 1 (draft)"))
            .with_children(vec![loc("html", "h1"), loc("problem", "p1")]),
        ContentNode::new(loc("html", "h1"))
            .with_field("data", Scope::Content, FieldValue::text("<p>Hello, draft</p>")),
        ContentNode::new(loc("vertical", "v3"))
            .with_field("display_name", Scope::Settings, FieldValue::text("New unit")),
        ContentNode::new(loc("html", "loose")),
        ContentNode::new(loc("chapter", "ch1"))
            .with_field("display_name", Scope::Settings, FieldValue::text("Week 1 (draft)"))
            .with_children(vec![loc("sequential", "s1")]),
    ]
}

/// Asset store holding the default course image
pub fn demo_assets() -> MemoryAssetStore {
    let assets = MemoryAssetStore::new();
    assets.insert(&key(), "images_course_image.jpg", "image/jpeg", b"\xff\xd8jpeg".to_vec()).unwrap();
    assets.insert(&key(), "handouts/syllabus.pdf", "application/pdf", b"%PDF".to_vec()).unwrap();
    assets
}

// ============================================================================
// Filesystem helpers
// ============================================================================

/// Parse a JSON file
pub fn read_json(path: &Path) -> JsonValue {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

/// Relative path → file contents (`None` for directories)
pub fn tree_snapshot(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Option<Vec<u8>>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            if path.is_dir() {
                out.insert(rel, None);
                walk(root, &path, out);
            } else {
                out.insert(rel, Some(fs::read(&path).unwrap()));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

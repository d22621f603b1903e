//! Draft subtrees

use crate::common::*;
use coursepack::{export_course, export_course_with, ExportConfig, XmlSerializer};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_draft_counts() {
    let dir = TempDir::new().unwrap();
    let info = export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    // v1, h1, v3 have parents; "loose" does not; the chapter draft is direct-only
    assert_eq!(info.draft_nodes, 3);
    assert_eq!(info.orphans_skipped, 1);
    assert_eq!(info.draft_roots, 2);
}

#[test]
fn test_draft_roots_carry_parent_attributes() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();
    let drafts = dir.path().join("demo/drafts");

    let v1 = fs::read_to_string(drafts.join("vertical/v1.xml")).unwrap();
    assert!(v1.contains("index_in_children_list=\"0\""));
    assert!(v1.contains("parent_url=\"i4x://edX/DemoX/sequential/s1\""));
    assert!(v1.contains("display_name=\"Unit 1 (draft)\""));

    let v3 = fs::read_to_string(drafts.join("vertical/v3.xml")).unwrap();
    assert!(v3.contains("index_in_children_list=\"2\""));
}

#[test]
fn test_draft_descendants_written_once_under_their_root() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();
    let drafts = dir.path().join("demo/drafts");

    // h1 comes out as part of v1's subtree, with its draft text and no parent attributes
    let h1 = fs::read_to_string(drafts.join("html/h1.xml")).unwrap();
    assert!(h1.contains("Hello, draft"));
    assert!(!h1.contains("parent_url"));
    // p1 has no draft of its own but is part of the v1 subtree
    assert!(drafts.join("problem/p1.xml").is_file());
}

#[test]
fn test_orphans_and_direct_only_drafts_not_exported() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();
    let drafts = dir.path().join("demo/drafts");

    assert!(!drafts.join("html/loose.xml").exists());
    assert!(!drafts.join("chapter").exists());
}

#[test]
fn test_direct_only_categories_from_config() {
    let dir = TempDir::new().unwrap();
    let config = ExportConfig::from_toml_str(
        "direct_only_categories = [\"course\", \"chapter\", \"sequential\", \"vertical\"]",
    )
    .unwrap();
    let info = export_course_with(
        &demo_store(),
        None,
        &stored_key(),
        dir.path(),
        "demo",
        &config,
        &XmlSerializer::default(),
    )
    .unwrap();

    // Only the html drafts remain: h1 is exported on its own, "loose" is orphaned
    assert_eq!(info.draft_roots, 1);
    let h1 = fs::read_to_string(dir.path().join("demo/drafts/html/h1.xml")).unwrap();
    assert!(h1.contains("parent_url=\"i4x://edX/DemoX/vertical/v1\""));
    assert!(h1.contains("index_in_children_list=\"0\""));
}

#[test]
fn test_store_without_drafts_writes_no_drafts_dir() {
    let dir = TempDir::new().unwrap();
    let store = MemoryTreeStore::with_draft_support(false);
    for node in published_nodes() {
        store.insert_published(node);
    }
    let info = export_course(&store, None, &stored_key(), dir.path(), "demo").unwrap();
    assert_eq!(info.draft_roots, 0);
    assert!(!dir.path().join("demo/drafts").exists());
}

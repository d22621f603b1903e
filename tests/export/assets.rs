//! Static assets and the legacy default course image

use crate::common::*;
use coursepack::{export_course, Branch, TreeStore};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_assets_and_manifest_exported() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), Some(&demo_assets()), &stored_key(), dir.path(), "demo").unwrap();

    let root = dir.path().join("demo");
    assert_eq!(fs::read(root.join("static/handouts/syllabus.pdf")).unwrap(), b"%PDF");
    let manifest = read_json(&root.join("policies/assets.json"));
    assert_eq!(manifest["handouts_syllabus.pdf"]["content_type"], "application/pdf");
}

#[test]
fn test_default_course_image_copied_to_legacy_path() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), Some(&demo_assets()), &stored_key(), dir.path(), "demo").unwrap();

    assert_eq!(
        fs::read(dir.path().join("demo/static/images/course_image.jpg")).unwrap(),
        b"\xff\xd8jpeg"
    );
}

#[test]
fn test_missing_default_image_does_not_fail_export() {
    let dir = TempDir::new().unwrap();
    let assets = MemoryAssetStore::new();
    let info = export_course(&demo_store(), Some(&assets), &stored_key(), dir.path(), "demo").unwrap();

    assert_eq!(info.published_nodes, 7);
    assert!(!dir.path().join("demo/static/images/course_image.jpg").exists());
    assert!(dir.path().join("demo/policies/2024/policy.json").is_file());
}

#[test]
fn test_explicit_course_image_not_copied() {
    let dir = TempDir::new().unwrap();
    let store = demo_store();
    let mut course = store.get_item(&loc("course", "2024"), Branch::PublishedOnly).unwrap();
    // Explicitly set to the same name: no longer the default slot
    course.set_field("course_image", Scope::Settings, FieldValue::text("handouts_syllabus.pdf"));
    store.insert_published(course);

    export_course(&store, Some(&demo_assets()), &stored_key(), dir.path(), "demo").unwrap();
    assert!(!dir.path().join("demo/static/images/course_image.jpg").exists());
}

#[test]
fn test_no_asset_store_writes_no_static_dir() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();
    assert!(!dir.path().join("demo/static").exists());
    assert!(!dir.path().join("demo/policies/assets.json").exists());
}

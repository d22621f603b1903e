//! Extra content items and field sidecars

use crate::common::*;
use coursepack::export_course;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_extra_content_files() {
    let dir = TempDir::new().unwrap();
    let info = export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();
    assert_eq!(info.extra_items, 3);

    let root = dir.path().join("demo");
    assert_eq!(fs::read_to_string(root.join("tabs/syllabus.html")).unwrap(), "<h1>Syllabus</h1>");
    assert_eq!(
        fs::read_to_string(root.join("info/updates.html")).unwrap(),
        "<ol><li>Welcome</li></ol>"
    );
    assert_eq!(
        fs::read_to_string(root.join("about/overview.html")).unwrap(),
        "<section>About</section>"
    );
    // No custom tag templates in the course
    assert!(!root.join("custom_tags").exists());
}

#[test]
fn test_content_field_sidecars() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    let root = dir.path().join("demo/tabs");
    assert_eq!(read_json(&root.join("syllabus.tab_config.json"))["position"], 3);
    // Settings fields and the data field never get sidecars
    assert!(!root.join("syllabus.display_name.json").exists());
    assert!(!root.join("syllabus.data.json").exists());
}

#[test]
fn test_custom_tag_template_has_no_suffix() {
    let dir = TempDir::new().unwrap();
    let store = demo_store();
    store.insert_published(
        ContentNode::new(loc("custom_tag_template", "book"))
            .with_field("data", Scope::Content, FieldValue::text("<a href=\"$url\">$title</a>")),
    );
    export_course(&store, None, &stored_key(), dir.path(), "demo").unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("demo/custom_tags/book")).unwrap(),
        "<a href=\"$url\">$title</a>"
    );
}

//! Course markup and archive layout

use crate::common::*;
use coursepack::{convert_between_versions, export_course, get_version};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_course_xml_points_at_course_root() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    let course_xml = fs::read_to_string(dir.path().join("demo/course.xml")).unwrap();
    assert_eq!(course_xml, "<course url_name=\"2024\" org=\"edX\" course=\"DemoX\"/>\n");
}

#[test]
fn test_published_tree_written_node_per_file() {
    let dir = TempDir::new().unwrap();
    let info = export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();
    assert_eq!(info.published_nodes, 7);

    let root = dir.path().join("demo");
    for file in [
        "course/2024.xml",
        "chapter/ch1.xml",
        "sequential/s1.xml",
        "vertical/v1.xml",
        "vertical/v2.xml",
        "html/h1.xml",
        "problem/p1.xml",
    ] {
        assert!(root.join(file).is_file(), "missing {}", file);
    }
    // Published view: the draft-only unit is absent and the draft html text is not used
    assert!(!root.join("vertical/v3.xml").exists());
    let html = fs::read_to_string(root.join("html/h1.xml")).unwrap();
    assert!(html.contains("&lt;p&gt;Hello&lt;/p&gt;"));

    let sequential = fs::read_to_string(root.join("sequential/s1.xml")).unwrap();
    assert!(sequential.contains("<vertical url_name=\"v1\"/>"));
    assert!(!sequential.contains("v3"));
}

#[test]
fn test_references_rewritten_into_export_namespace() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    // The foreign reference now names the exported course
    let problem = fs::read_to_string(dir.path().join("demo/problem/p1.xml")).unwrap();
    assert!(problem.contains("source=\"i4x://edX/DemoX/html/shared\""));
    assert!(!problem.contains("MITx"));
}

#[test]
fn test_content_reference_list_written_with_node() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    let problem = fs::read_to_string(dir.path().join("demo/problem/p1.xml")).unwrap();
    assert!(problem.contains(
        "related=\"[&quot;i4x://edX/DemoX/html/h1&quot;,&quot;i4x://edX/DemoX/html/x&quot;]\""
    ));
}

#[test]
fn test_export_then_convert_round_trip() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("exported");
    export_course(&demo_store(), Some(&demo_assets()), &stored_key(), &exported, "demo").unwrap();
    assert_eq!(get_version(&exported.join("demo")).unwrap(), Some(0));

    let v1 = dir.path().join("v1");
    assert_eq!(convert_between_versions(&exported, &v1).unwrap(), 1);
    assert!(v1.join("demo/published/course.xml").is_file());
    assert!(v1.join("demo/drafts/vertical/v1.xml").is_file());
    assert!(!v1.join("demo/published/drafts").exists());

    let v0 = dir.path().join("v0");
    assert_eq!(convert_between_versions(&v1, &v0).unwrap(), 0);
    assert_eq!(tree_snapshot(&v0), tree_snapshot(&exported));
}

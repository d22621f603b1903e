//! Policy documents

use crate::common::*;
use coursepack::export_course;
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_policy_holds_own_metadata() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    let policy = read_json(&dir.path().join("demo/policies/2024/policy.json"));
    assert_eq!(
        policy,
        json!({
            "course/2024": {
                "advanced_modules": ["poll", "annotatable"],
                "display_name": "Demo Course",
                "start": "2024-01-15T00:00:00Z"
            }
        })
    );
}

#[test]
fn test_grading_policy_written() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    let grading = read_json(&dir.path().join("demo/policies/2024/grading_policy.json"));
    assert_eq!(grading["GRADE_CUTOFFS"]["Pass"], 0.5);
    assert_eq!(grading["GRADER"][0]["type"], "Homework");
}

#[test]
fn test_policy_files_sorted_and_indented() {
    let dir = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), dir.path(), "demo").unwrap();

    let text = fs::read_to_string(dir.path().join("demo/policies/2024/grading_policy.json")).unwrap();
    assert!(text.starts_with("{\n    \"GRADER\": ["));
    assert!(text.find("\"GRADER\"").unwrap() < text.find("\"GRADE_CUTOFFS\"").unwrap());
}

#[test]
fn test_policies_identical_across_exports() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    export_course(&demo_store(), None, &stored_key(), first.path(), "demo").unwrap();
    export_course(&demo_store(), None, &stored_key(), second.path(), "demo").unwrap();

    for file in ["policy.json", "grading_policy.json"] {
        let a = fs::read(first.path().join("demo/policies/2024").join(file)).unwrap();
        let b = fs::read(second.path().join("demo/policies/2024").join(file)).unwrap();
        assert_eq!(a, b, "{} differs between exports", file);
    }
}

fn course_with_settings<'a>(settings: impl Iterator<Item = (&'a String, &'a i64)>) -> MemoryTreeStore {
    let mut course = ContentNode::new(loc("course", "2024"));
    for (name, value) in settings {
        course.set_field(name.clone(), Scope::Settings, FieldValue::Plain(json!(value)));
    }
    let store = MemoryTreeStore::new();
    store.insert_published(course);
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_policy_bytes_independent_of_field_order(
        settings in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12)
    ) {
        let forward = TempDir::new().unwrap();
        let reverse = TempDir::new().unwrap();
        export_course(&course_with_settings(settings.iter()), None, &stored_key(), forward.path(), "demo").unwrap();
        export_course(&course_with_settings(settings.iter().rev()), None, &stored_key(), reverse.path(), "demo").unwrap();

        let policy = "demo/policies/2024/policy.json";
        let a = fs::read(forward.path().join(policy)).unwrap();
        let b = fs::read(reverse.path().join(policy)).unwrap();
        prop_assert_eq!(&a, &b);

        let expected: BTreeMap<String, serde_json::Value> =
            settings.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        prop_assert_eq!(
            read_json(&forward.path().join(policy)),
            json!({ "course/2024": expected })
        );
    }
}

//! Reference adaptation
//!
//! Before a subtree is serialized, every reference-valued field is rewritten
//! so it points into the destination namespace, and every node is bound to
//! the directory its serialization writes into.

use coursepack_core::{CourseKey, FieldValue, Subtree, CHILDREN_FIELD};
use std::path::Path;

/// Rewrite every reference field of `tree` into `destination` and bind `write_target`
///
/// - `SingleRef(Some(loc))` is mapped, `SingleRef(None)` kept
/// - `RefList` elements are mapped in order, `RefMap` values are mapped under the same keys
/// - `Plain` values are untouched
/// - `children` is never rewritten; the walk recurses into every child instead
///
/// Only explicitly set fields are visited. Applying the same adaptation twice
/// yields the same tree.
pub fn adapt_references(tree: &mut Subtree, destination: &CourseKey, write_target: &Path) {
    let node = &mut tree.node;
    node.export_dir = Some(write_target.to_path_buf());

    for (name, field) in node.fields.iter_mut() {
        if name == CHILDREN_FIELD {
            continue;
        }
        let Some(value) = field.value.as_mut() else {
            continue;
        };
        match value {
            FieldValue::Plain(_) | FieldValue::SingleRef(None) => {}
            FieldValue::SingleRef(Some(location)) => {
                *location = location.map_into_course(destination);
            }
            FieldValue::RefList(locations) => {
                for location in locations.iter_mut() {
                    *location = location.map_into_course(destination);
                }
            }
            FieldValue::RefMap(map) => {
                for location in map.values_mut() {
                    *location = location.map_into_course(destination);
                }
            }
        }
    }

    for child in tree.children.iter_mut() {
        adapt_references(child, destination, write_target);
    }
}

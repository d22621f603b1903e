//! Archive layer for Coursepack
//!
//! This crate handles everything that touches the archive directory:
//!
//! - Layout: directory and file names of versions 0 and 1
//! - Format: version marker detection and 0 ⇄ 1 conversion
//! - Content: extra-content item files, field sidecars, policy documents
//! - JSON: deterministic (sorted, indented) document encoding
//! - XML: per-node markup serialization of bound subtrees

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod error;
pub mod format;
pub mod fs;
pub mod json;
pub mod layout;
pub mod xml;

pub use content::{write_field_sidecars, write_item, write_policies, ItemFiles};
pub use error::{ArchiveError, ArchiveResult};
pub use format::{convert_between_versions, get_version, version_marker, ArchiveVersion};
pub use fs::copy_dir_recursive;
pub use json::{sort_keys, to_sorted_pretty, write_sorted_json};
pub use layout::{
    ArchivePaths, ASSETS_JSON, COURSE_XML, DRAFT_DIR, EXPORT_VERSION_FILE, EXPORT_VERSION_KEY,
    GRADING_POLICY_JSON, POLICIES_DIR, POLICY_JSON, PUBLISHED_DIR, STATIC_DIR,
};
pub use xml::{SubtreeSerializer, XmlSerializer, URL_NAME_ATTR};

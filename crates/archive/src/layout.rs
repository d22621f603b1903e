//! Archive directory structure
//!
//! An export writes one course directory. Version 0 keeps everything in that
//! directory; version 1 splits it into a published and a draft branch:
//!
//! ```text
//! version 0                         version 1
//! <course>/                         <course>/
//! ├── course.xml                    ├── format.json   {"export_format": 1}
//! ├── policies/<run>/...            ├── published/
//! ├── static/...                    │   ├── course.xml
//! ├── tabs/ info/ about/ ...        │   └── ...
//! └── drafts/...                    └── drafts/...
//! ```
//!
//! Names here are the interchange format with every consumer of produced
//! archives and must not change.

use std::path::{Path, PathBuf};

/// Draft branch directory
pub const DRAFT_DIR: &str = "drafts";
/// Published branch directory (version 1 only)
pub const PUBLISHED_DIR: &str = "published";
/// Version marker file (version 1 only)
pub const EXPORT_VERSION_FILE: &str = "format.json";
/// Key of the version number inside the marker
pub const EXPORT_VERSION_KEY: &str = "export_format";
/// Root markup document
pub const COURSE_XML: &str = "course.xml";
/// Policies directory
pub const POLICIES_DIR: &str = "policies";
/// Per-run course metadata document
pub const POLICY_JSON: &str = "policy.json";
/// Per-run grading policy document
pub const GRADING_POLICY_JSON: &str = "grading_policy.json";
/// Asset manifest, relative to the policies directory
pub const ASSETS_JSON: &str = "assets.json";
/// Static asset directory
pub const STATIC_DIR: &str = "static";

/// Course directory paths of an exported archive
#[derive(Debug, Clone)]
pub struct ArchivePaths {
    /// Root course directory
    root: PathBuf,
}

impl ArchivePaths {
    /// Create paths from the course directory
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        ArchivePaths {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the course directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the `course.xml` path
    pub fn course_xml(&self) -> PathBuf {
        self.root.join(COURSE_XML)
    }

    /// Get the policies directory
    pub fn policies_dir(&self) -> PathBuf {
        self.root.join(POLICIES_DIR)
    }

    /// Get the per-run policy directory
    pub fn run_policy_dir(&self, run: &str) -> PathBuf {
        self.policies_dir().join(run)
    }

    /// Get the asset manifest path
    pub fn assets_manifest(&self) -> PathBuf {
        self.policies_dir().join(ASSETS_JSON)
    }

    /// Get the static asset directory
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }

    /// Get the drafts directory
    pub fn drafts_dir(&self) -> PathBuf {
        self.root.join(DRAFT_DIR)
    }

    /// Get the published branch directory (version 1)
    pub fn published_dir(&self) -> PathBuf {
        self.root.join(PUBLISHED_DIR)
    }

    /// Get the version marker path
    pub fn version_file(&self) -> PathBuf {
        self.root.join(EXPORT_VERSION_FILE)
    }
}

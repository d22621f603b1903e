//! Export configuration via `export.toml`
//!
//! Every key is optional; a missing file or key falls back to the defaults
//! below, which reproduce the standard archive layout.

use coursepack_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up next to a course snapshot.
pub const CONFIG_FILE_NAME: &str = "export.toml";

/// Categories that are always written directly to the published branch
/// and therefore never exported as drafts.
pub const DEFAULT_DIRECT_ONLY_CATEGORIES: [&str; 6] = [
    "course",
    "chapter",
    "sequential",
    "about",
    "static_tab",
    "course_info",
];

/// Archive path the default course image is copied to for older readers.
pub const DEFAULT_LEGACY_COURSE_IMAGE: &str = "static/images/course_image.jpg";

/// Export configuration loaded from `export.toml`.
///
/// # Example
///
/// ```toml
/// direct_only_categories = ["course", "chapter", "sequential"]
/// legacy_course_image = "static/images/course_image.jpg"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Categories excluded from the draft query. A list in the file replaces
    /// the default list entirely.
    #[serde(default = "default_direct_only_categories")]
    pub direct_only_categories: Vec<String>,
    /// Relative path of the legacy default course image copy.
    #[serde(default = "default_legacy_course_image")]
    pub legacy_course_image: String,
}

fn default_direct_only_categories() -> Vec<String> {
    DEFAULT_DIRECT_ONLY_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_legacy_course_image() -> String {
    DEFAULT_LEGACY_COURSE_IMAGE.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            direct_only_categories: default_direct_only_categories(),
            legacy_course_image: default_legacy_course_image(),
        }
    }
}

impl ExportConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Coursepack export configuration
#
# Categories that are never exported as drafts. Nodes of these categories
# are always written directly to the published branch.
direct_only_categories = ["course", "chapter", "sequential", "about", "static_tab", "course_info"]

# Where the default course image is copied for readers of the legacy layout.
legacy_course_image = "static/images/course_image.jpg"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Serialization(format!("Failed to parse export config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::Serialization(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// True if drafts of `category` are never exported
    pub fn is_direct_only(&self, category: &str) -> bool {
        self.direct_only_categories.iter().any(|c| c == category)
    }
}

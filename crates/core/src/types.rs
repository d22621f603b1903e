//! Core identity types for course content
//!
//! This module defines the addressing scheme shared by every crate:
//! - CourseKey: Namespace of a course tree (org/course/run + qualifiers)
//! - Location: Composite key of one node (namespace + category + name)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of the versioned course key form
const COURSE_KEY_PREFIX: &str = "course-v1:";

/// Scheme of the deprecated location URL form
const DEPRECATED_SCHEME: &str = "i4x://";

/// Category used for static asset locations
pub const ASSET_CATEGORY: &str = "asset";

// =============================================================================
// CourseKey
// =============================================================================

/// Namespace of a course tree: org → course → run
///
/// A key may carry a branch and a version qualifier when it addresses one
/// specific revision inside a versioned tree store. Archives are written
/// against the version-agnostic form of the key (see [`CourseKey::version_agnostic`]).
///
/// Formats:
/// - deprecated: `"org/course/run"`
/// - versioned: `"course-v1:org+course+run[+branch@b][+version@v]"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseKey {
    /// Organization identifier
    pub org: String,
    /// Course identifier
    pub course: String,
    /// Run identifier
    pub run: String,
    /// Branch qualifier (e.g. "draft-branch")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Version qualifier (opaque version guid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_guid: Option<String>,
}

impl CourseKey {
    /// Create a version-agnostic course key
    pub fn new(org: impl Into<String>, course: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            course: course.into(),
            run: run.into(),
            branch: None,
            version_guid: None,
        }
    }

    /// Return a copy qualified with the given branch
    pub fn for_branch(&self, branch: impl Into<String>) -> Self {
        Self {
            branch: Some(branch.into()),
            ..self.clone()
        }
    }

    /// Return a copy qualified with the given version
    pub fn for_version(&self, version_guid: impl Into<String>) -> Self {
        Self {
            version_guid: Some(version_guid.into()),
            ..self.clone()
        }
    }

    /// Strip branch and version qualifiers
    ///
    /// The result names the course independently of any revision and is the
    /// namespace references are mapped into on export.
    pub fn version_agnostic(&self) -> Self {
        Self::new(self.org.clone(), self.course.clone(), self.run.clone())
    }

    /// True if the key carries no branch or version qualifier
    pub fn is_version_agnostic(&self) -> bool {
        self.branch.is_none() && self.version_guid.is_none()
    }

    /// Build a location in this course
    pub fn make_location(&self, category: impl Into<String>, name: impl Into<String>) -> Location {
        Location::new(self.clone(), category, name)
    }

    /// Deprecated `org/course/run` form, qualifiers dropped
    pub fn to_deprecated_string(&self) -> String {
        format!("{}/{}/{}", self.org, self.course, self.run)
    }

    fn parse_deprecated(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [org, course, run] if !org.is_empty() && !course.is_empty() && !run.is_empty() => {
                Ok(Self::new(*org, *course, *run))
            }
            _ => Err(Error::InvalidKey(format!(
                "expected org/course/run, got '{}'",
                s
            ))),
        }
    }

    fn parse_versioned(body: &str) -> Result<Self> {
        let mut parts = body.split('+');
        let mut next = |what: &str| {
            parts
                .next()
                .filter(|p| !p.is_empty() && !p.contains('@'))
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidKey(format!("missing {} in '{}'", what, body)))
        };
        let mut key = Self::new(next("org")?, next("course")?, next("run")?);

        for qualifier in body.split('+').skip(3) {
            match qualifier.split_once('@') {
                Some(("branch", b)) if !b.is_empty() => key.branch = Some(b.to_string()),
                Some(("version", v)) if !v.is_empty() => key.version_guid = Some(v.to_string()),
                _ => {
                    return Err(Error::InvalidKey(format!(
                        "unrecognized qualifier '{}' in '{}'",
                        qualifier, body
                    )))
                }
            }
        }
        Ok(key)
    }
}

impl FromStr for CourseKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.strip_prefix(COURSE_KEY_PREFIX) {
            Some(body) => Self::parse_versioned(body),
            None => Self::parse_deprecated(s),
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_version_agnostic() {
            return write!(f, "{}/{}/{}", self.org, self.course, self.run);
        }
        write!(
            f,
            "{}{}+{}+{}",
            COURSE_KEY_PREFIX, self.org, self.course, self.run
        )?;
        if let Some(branch) = &self.branch {
            write!(f, "+branch@{}", branch)?;
        }
        if let Some(version) = &self.version_guid {
            write!(f, "+version@{}", version)?;
        }
        Ok(())
    }
}

// =============================================================================
// Location
// =============================================================================

/// Address of one content node: namespace + category + local name
///
/// The category decides how a node is exported (e.g. whether its draft state
/// may be exported on its own). The name is unique within a course and
/// category and is preserved when the location moves between namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Namespace the node belongs to
    pub course_key: CourseKey,
    /// Node category (e.g. "chapter", "vertical", "html")
    pub category: String,
    /// Local name, unique per course and category
    pub name: String,
}

impl Location {
    /// Create a new location
    pub fn new(course_key: CourseKey, category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            course_key,
            category: category.into(),
            name: name.into(),
        }
    }

    /// Location of a static asset
    ///
    /// Slashes in the asset path are flattened into underscores, matching how
    /// assets are named in the asset store.
    pub fn asset(course_key: &CourseKey, path: &str) -> Self {
        let name = path.trim_start_matches('/').replace('/', "_");
        Self::new(course_key.clone(), ASSET_CATEGORY, name)
    }

    /// Reinterpret this location under another namespace
    ///
    /// Category and name are kept; org/course/run and any qualifiers come from
    /// `destination`. Mapping into the namespace a location already has is a no-op.
    pub fn map_into_course(&self, destination: &CourseKey) -> Self {
        Self {
            course_key: destination.clone(),
            category: self.category.clone(),
            name: self.name.clone(),
        }
    }

    /// Deprecated URL form: `i4x://org/course/category/name`
    pub fn to_deprecated_string(&self) -> String {
        format!(
            "{}{}/{}/{}/{}",
            DEPRECATED_SCHEME, self.course_key.org, self.course_key.course, self.category, self.name
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.course_key.is_version_agnostic() {
            f.write_str(&self.to_deprecated_string())
        } else {
            write!(f, "{}/{}/{}", self.course_key, self.category, self.name)
        }
    }
}

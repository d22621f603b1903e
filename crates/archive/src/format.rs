//! Archive layout versions
//!
//! Version detection reads the `format.json` marker of a course directory;
//! its absence means version 0. Conversion toggles between the two known
//! layouts by copying into a fresh target directory:
//!
//! | from | to | operation |
//! |------|----|-----------|
//! | 0 | 1 | write marker, copy course to `published/` (minus nested `drafts/`), copy `drafts/` beside it |
//! | 1 | 0 | copy `published/` up to the course directory, copy `drafts/` into it |
//!
//! Detection and validation are separate: [`get_version`] reports whatever
//! number the marker holds, [`convert_between_versions`] rejects anything
//! other than 0 or 1.

use crate::error::{ArchiveError, ArchiveResult};
use crate::fs::copy_dir_recursive;
use crate::layout::{ArchivePaths, DRAFT_DIR, EXPORT_VERSION_KEY};
use serde_json::Value as JsonValue;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The two layout versions a conversion can start from or produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveVersion {
    /// Flat layout, drafts nested in the course directory
    V0,
    /// Split layout with `published/` and `drafts/` branches and a marker file
    V1,
}

impl ArchiveVersion {
    /// Numeric version as written in the marker
    pub fn number(self) -> u32 {
        match self {
            ArchiveVersion::V0 => 0,
            ArchiveVersion::V1 => 1,
        }
    }

    /// The version a conversion produces
    pub fn toggled(self) -> Self {
        match self {
            ArchiveVersion::V0 => ArchiveVersion::V1,
            ArchiveVersion::V1 => ArchiveVersion::V0,
        }
    }
}

impl TryFrom<i64> for ArchiveVersion {
    type Error = ArchiveError;

    fn try_from(version: i64) -> ArchiveResult<Self> {
        match version {
            0 => Ok(ArchiveVersion::V0),
            1 => Ok(ArchiveVersion::V1),
            other => Err(ArchiveError::UnknownVersion(other.to_string())),
        }
    }
}

/// Marker document contents for a version
pub fn version_marker(version: ArchiveVersion) -> String {
    format!("{{\"{}\": {}}}\n", EXPORT_VERSION_KEY, version.number())
}

/// Detect the layout version of a course directory
///
/// Returns `Some(0)` when no marker exists, `Some(n)` when the marker holds
/// an integer under the version key, and `None` when the marker lacks the key.
/// Unrecognized numbers are returned as-is; validation happens on conversion.
///
/// # Errors
///
/// - The marker cannot be read or is not JSON
/// - The version value is not an integer
pub fn get_version(course_path: &Path) -> ArchiveResult<Option<i64>> {
    let marker = ArchivePaths::from_root(course_path).version_file();
    if !marker.is_file() {
        return Ok(Some(0));
    }

    let data: JsonValue = serde_json::from_slice(&fs::read(&marker)?)?;
    match data.get(EXPORT_VERSION_KEY) {
        None => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            ArchiveError::invalid_archive(format!(
                "{} in {} must be an integer, got {}",
                EXPORT_VERSION_KEY,
                marker.display(),
                value
            ))
        }),
    }
}

/// Convert a version 0 archive to version 1, and vice versa
///
/// `source_dir` must contain exactly one entry: the course directory. The
/// converted course directory is written to `target_dir/<course>`, which must
/// not exist yet. The source is never modified. A failure part way leaves a
/// partially populated target that callers should discard.
///
/// Returns the version number of the converted archive.
///
/// # Errors
///
/// - `InvalidArchive` if the source does not hold a single course directory
/// - `UnknownVersion` if the marker names a version other than 0 or 1
/// - `MissingPublishedBranch` if a version 1 source has no `published/`
/// - I/O errors while copying
pub fn convert_between_versions(source_dir: &Path, target_dir: &Path) -> ArchiveResult<u32> {
    let course_name = single_course_dir(source_dir)?;
    let source = ArchivePaths::from_root(source_dir.join(&course_name));

    let original = match get_version(source.root())? {
        Some(v) => ArchiveVersion::try_from(v)?,
        None => {
            return Err(ArchiveError::UnknownVersion(format!(
                "missing {} key",
                EXPORT_VERSION_KEY
            )))
        }
    };
    let desired = original.toggled();

    let copy_root = target_dir.join(&course_name);
    if copy_root.exists() {
        return Err(ArchiveError::invalid_archive(format!(
            "conversion target {} already exists",
            copy_root.display()
        )));
    }
    fs::create_dir_all(target_dir)?;
    let target = ArchivePaths::from_root(&copy_root);

    match desired {
        ArchiveVersion::V1 => convert_to_version_1(&source, &target)?,
        ArchiveVersion::V0 => convert_to_version_0(&source, &target)?,
    }

    info!(
        target: "coursepack::format",
        course = %course_name.to_string_lossy(),
        from = original.number(),
        to = desired.number(),
        "Archive converted"
    );

    Ok(desired.number())
}

fn convert_to_version_1(source: &ArchivePaths, target: &ArchivePaths) -> ArchiveResult<()> {
    fs::create_dir(target.root())?;
    fs::write(target.version_file(), version_marker(ArchiveVersion::V1))?;

    copy_drafts(source, target)?;

    let published = target.published_dir();
    copy_dir_recursive(source.root(), &published)?;
    let nested_drafts = published.join(DRAFT_DIR);
    if nested_drafts.is_dir() {
        fs::remove_dir_all(&nested_drafts)?;
    }
    Ok(())
}

fn convert_to_version_0(source: &ArchivePaths, target: &ArchivePaths) -> ArchiveResult<()> {
    let published = source.published_dir();
    if !published.is_dir() {
        return Err(ArchiveError::MissingPublishedBranch);
    }
    copy_dir_recursive(&published, target.root())?;

    // Any branch other than drafts is dropped
    copy_drafts(source, target)
}

fn copy_drafts(source: &ArchivePaths, target: &ArchivePaths) -> ArchiveResult<()> {
    let drafts = source.drafts_dir();
    if drafts.is_dir() {
        copy_dir_recursive(&drafts, &target.drafts_dir())?;
    }
    Ok(())
}

/// Name of the only entry of `source_dir`, which must be a directory
fn single_course_dir(source_dir: &Path) -> ArchiveResult<OsString> {
    let entries: Vec<PathBuf> = fs::read_dir(source_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;

    match entries.as_slice() {
        [only] if only.is_dir() => only
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| ArchiveError::invalid_archive("course directory has no name")),
        _ => Err(ArchiveError::invalid_archive(
            "source archive does not have single course directory at top level",
        )),
    }
}

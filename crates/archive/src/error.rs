//! Archive error types

use std::io;
use thiserror::Error;

/// Errors that can occur while writing or converting an archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Source directory does not have the shape of an archive
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// Version marker names a version that cannot be converted
    #[error("unknown version: {0}")]
    UnknownVersion(String),

    /// Version 1 archive without its `published/` branch
    #[error("a version 1 archive must contain a published branch")]
    MissingPublishedBranch,

    /// Markup serialization failed
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tree store or asset store failure
    #[error(transparent)]
    Store(#[from] coursepack_core::Error),
}

impl ArchiveError {
    /// Create an invalid archive error
    pub fn invalid_archive(msg: impl Into<String>) -> Self {
        Self::InvalidArchive(msg.into())
    }

    /// Create an XML error
    pub fn xml(msg: impl Into<String>) -> Self {
        Self::Xml(msg.into())
    }

    /// True for errors caused by the shape of the input archive
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive(_) | Self::UnknownVersion(_) | Self::MissingPublishedBranch
        )
    }
}

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

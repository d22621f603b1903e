//! Error types for course content access
//!
//! Errors raised by the data model and by collaborator implementations
//! (tree store, asset store). We use `thiserror` for automatic `Display` and
//! `Error` trait implementations.

use crate::types::Location;
use std::io;
use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the content model and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Item, asset or course not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed course key or location string
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Stored data contradicts itself (e.g. a parent that does not list its child)
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Backend-specific store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a not-found error for a location
    pub fn item_not_found(location: &Location) -> Self {
        Error::NotFound(location.to_string())
    }

    /// True if this error reports a missing item
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

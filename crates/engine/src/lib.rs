//! Export engine for Coursepack
//!
//! This crate orchestrates course export on top of the archive layer:
//! - Adapter: rewriting reference fields into the destination namespace
//! - Drafts: resolving the topmost draft nodes to export
//! - Export: the full export sequence (tree, assets, extra content, policies, drafts)
//! - Config: `export.toml` settings
//! - Memory: in-memory tree and asset stores
//!
//! The engine only reaches content through the `TreeStore` and `AssetStore`
//! traits, and only reaches disk through `coursepack-archive`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod config;
pub mod drafts;
pub mod export;
pub mod memory;

pub use adapter::adapt_references;
pub use config::{ExportConfig, CONFIG_FILE_NAME, DEFAULT_DIRECT_ONLY_CATEGORIES};
pub use drafts::{resolve_roots, DraftNode};
pub use export::{export_course, export_course_with, ExportInfo, EXTRA_CONTENT};
pub use memory::{MemoryAssetStore, MemoryTreeStore, Snapshot, SnapshotAsset};

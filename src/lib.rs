//! Coursepack - course tree export to versioned directory archives
//!
//! Coursepack writes a course (an ordered tree of typed content nodes) into a
//! portable directory archive and converts archives between two on-disk
//! layout versions.
//!
//! # Quick Start
//!
//! ```ignore
//! use coursepack::{export_course, convert_between_versions, CourseKey, MemoryTreeStore};
//!
//! let store = MemoryTreeStore::from_snapshot(&Snapshot::load("demo.json".as_ref())?);
//! let key: CourseKey = "edX/DemoX/2024".parse()?;
//!
//! // Version 0 archive at out/demo
//! export_course(&store, None, &key, "out".as_ref(), "demo")?;
//!
//! // Version 1 archive at converted/demo
//! convert_between_versions("out".as_ref(), "converted".as_ref())?;
//! ```
//!
//! # Architecture
//!
//! - `coursepack-core`: data model and the `TreeStore`/`AssetStore` contracts
//! - `coursepack-archive`: archive layout, version conversion, JSON and XML writers
//! - `coursepack-engine`: reference adaptation, draft resolution, export, in-memory stores

pub use coursepack_archive::{
    convert_between_versions, get_version, ArchiveError, ArchivePaths, ArchiveResult,
    ArchiveVersion, SubtreeSerializer, XmlSerializer,
};
pub use coursepack_core::{
    Asset, AssetStore, Branch, CategoryFilter, ContentNode, CourseKey, Error, Field, FieldKind,
    FieldValue, ItemQuery, Location, Result, Revision, Scope, Subtree, TreeStore,
};
pub use coursepack_engine::{
    adapt_references, export_course, export_course_with, resolve_roots,
    DraftNode, ExportConfig, ExportInfo, MemoryAssetStore, MemoryTreeStore, Snapshot,
    SnapshotAsset,
};

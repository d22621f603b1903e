//! Export Integration Test Suite
//!
//! End-to-end coverage of course export against the in-memory stores:
//!
//! - `layout`: course markup, reference adaptation, export → convert round trip
//! - `policies`: policy documents and their byte-for-byte determinism
//! - `assets`: static assets and the legacy default course image
//! - `extra_content`: tabs, custom tags, updates, about pages and field sidecars
//! - `drafts`: draft root resolution, draft attributes, orphans
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test export
//! cargo test --test export drafts::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod assets;
mod drafts;
mod extra_content;
mod layout;
mod policies;

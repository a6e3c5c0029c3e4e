//! Core domain types for the Atelier content staging engine.
//!
//! This crate defines the vocabulary shared by the rest of the workspace:
//! opaque storage keys, stored-content references, draft identities,
//! in-memory files, content sections, and the staging policy that bounds
//! what a form may stage.
//!
//! # Example
//!
//! ```rust
//! use atelier_core::{OpaqueKey, StoredReference};
//!
//! // Legacy untagged values classify by shape.
//! let inline = StoredReference::from_untagged("<p>hello</p>");
//! let url = StoredReference::from_untagged("https://cdn.example.com/a.png");
//! let key = StoredReference::from_untagged("news/2024/cover");
//!
//! assert!(matches!(inline, StoredReference::Inline(_)));
//! assert!(matches!(url, StoredReference::Url(_)));
//! assert_eq!(key.key(), Some(&OpaqueKey::from("news/2024/cover")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod draft;
mod file;
mod key;
mod policy;
mod reference;
mod section;
mod telemetry;

pub use draft::DraftIdentity;
pub use file::LocalFile;
pub use key::OpaqueKey;
pub use policy::StagingPolicy;
pub use reference::StoredReference;
pub use section::{ContentSection, SectionRecord, StoredSection};
pub use telemetry::init_telemetry;

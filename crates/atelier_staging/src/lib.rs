//! Deferred asset staging and submission engine for Atelier.
//!
//! This crate implements the client-side pipeline behind a content form:
//! images and rich-text sections are edited entirely in memory, uploads are
//! deferred to final submission, and the commit step reconciles added,
//! removed, and edited assets against the key-addressed object store.
//!
//! The pieces, bottom up:
//!
//! - [`ContentResolver`] turns stored references (inline markup, URLs,
//!   opaque keys) into displayable content, degrading instead of failing
//! - [`PreviewUrls`] mints and accounts for ephemeral local preview URLs
//! - [`AssetStagingStore`] tracks existing assets, pending files, and the
//!   deletion ledger for one form instance
//! - [`SectionSynchronizer`] keeps an ordered list of rich-text sections,
//!   remembering each section's original storage key so edits overwrite
//!   instead of duplicating
//! - [`FormRules`] is the pre-flight validation gate
//! - [`SubmissionOrchestrator`] runs the commit-time sequence: upload
//!   pending files, serialize rich text, assemble the payload, and call
//!   the entity API exactly once
//!
//! Every store and synchronizer is owned by a single form instance; there
//! are no process-wide singletons, so concurrently open forms cannot
//! cross-contaminate state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod form;
mod ledger;
mod orchestrator;
mod preview;
mod resolver;
mod sections;
mod store;
mod validation;

pub use form::{DetailedDescription, FormDraft};
pub use ledger::DeletionLedger;
pub use orchestrator::SubmissionOrchestrator;
pub use preview::{PreviewUrl, PreviewUrls};
pub use resolver::ContentResolver;
pub use sections::SectionSynchronizer;
pub use store::{AssetOrigin, AssetStagingStore, StagedAsset};
pub use validation::{FormRules, NumericBound};

//! Atelier - deferred asset upload and content reconciliation
//!
//! Atelier is the engine behind a content-management front end's editing
//! forms: images and rich-text sections are edited entirely client-side,
//! uploads are deferred until final submission, and the commit step
//! reconciles added, removed, and edited assets against a key-addressed
//! object store — without corrupting or duplicating content that was
//! previously saved as opaque storage keys.
//!
//! # Features
//!
//! - **Deferred uploads**: nothing touches the network until "Save"
//! - **Staging policy**: per-module bounds on asset count, size, and type,
//!   enforced at selection time
//! - **Deletion ledger**: removals are committed server-side only after a
//!   successful save; cancelling leaves the server untouched
//! - **Overwrite-in-place**: rich-text bodies loaded from a storage key
//!   re-save to that same key, so repeated edits never leak orphan blobs
//! - **Graceful resolution**: display paths degrade to raw values instead
//!   of failing when the object store is unreachable
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use atelier::{
//!     FormDraft, FormRules, LocalFile, MemoryGateway, StagingPolicy,
//!     SubmissionOrchestrator,
//! };
//!
//! # use atelier::{Entity, EntityApi, EntityPayload, AtelierResult};
//! # struct NoopApi;
//! # #[async_trait::async_trait]
//! # impl EntityApi for NoopApi {
//! #     async fn create(&self, _payload: &EntityPayload) -> AtelierResult<Entity> {
//! #         Ok(Entity { id: "e-1".to_string() })
//! #     }
//! #     async fn update(&self, id: &str, _payload: &EntityPayload) -> AtelierResult<Entity> {
//! #         Ok(Entity { id: id.to_string() })
//! #     }
//! # }
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Arc::new(MemoryGateway::new());
//! let orchestrator = SubmissionOrchestrator::new(gateway, Arc::new(NoopApi));
//!
//! let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
//! draft.set_field("title", "Launch announcement".into());
//! draft
//!     .assets_mut()
//!     .stage_files(vec![LocalFile::new("cover.png", "image/png", vec![0u8; 64])])?;
//!
//! let entity = orchestrator.submit(&mut draft).await?;
//! println!("created {}", entity.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use atelier_core::{
    ContentSection, DraftIdentity, LocalFile, OpaqueKey, SectionRecord, StagingPolicy,
    StoredReference, StoredSection, init_telemetry,
};
pub use atelier_error::{
    AtelierError, AtelierErrorKind, AtelierResult, CommitError, CommitErrorKind, ConfigError,
    GatewayError, GatewayErrorKind, StagingError, StagingErrorKind, ValidationError,
    ValidationErrorKind,
};
pub use atelier_gateway::{
    ContentFetcher, Entity, EntityApi, EntityPayload, FileSystemGateway, HttpContentFetcher,
    MemoryFetcher, MemoryGateway, ObjectStoreGateway, UploadOptions, UploadReceipt,
};
pub use atelier_staging::{
    AssetOrigin, AssetStagingStore, ContentResolver, DeletionLedger, DetailedDescription,
    FormDraft, FormRules, NumericBound, PreviewUrl, PreviewUrls, SectionSynchronizer,
    SubmissionOrchestrator,
};

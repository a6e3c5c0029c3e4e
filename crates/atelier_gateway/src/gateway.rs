//! Object store gateway trait definition.

use atelier_core::OpaqueKey;
use atelier_error::AtelierResult;
use std::collections::HashMap;

/// Trait for key-addressed object store backends.
///
/// The gateway assigns opaque keys to uploaded blobs, resolves keys to
/// fetchable URLs, and deletes by key. The engine only ever deletes
/// server-side, through the deletion ledger it attaches to entity
/// payloads; `delete_by_key` exists so backends are complete and testable
/// end-to-end.
#[async_trait::async_trait]
pub trait ObjectStoreGateway: Send + Sync {
    /// Store a blob under the given address prefix and return its key.
    ///
    /// When `options.custom_key` is set the backend must overwrite that
    /// key in place instead of minting a new one.
    ///
    /// # Arguments
    ///
    /// * `data` - The blob bytes
    /// * `path_prefix` - Address prefix every key of one submission shares
    /// * `options` - Overwrite target, filename, content type, policy hints
    async fn upload(
        &self,
        data: &[u8],
        path_prefix: &str,
        options: &UploadOptions,
    ) -> AtelierResult<UploadReceipt>;

    /// Resolve a key to a time-limited fetch URL.
    async fn resolve_url(&self, key: &OpaqueKey) -> AtelierResult<String>;

    /// Resolve many keys in one round trip.
    ///
    /// Keys unknown to the backend are omitted from the result rather than
    /// failing the batch; callers decide how to degrade.
    async fn resolve_urls(
        &self,
        keys: &[OpaqueKey],
    ) -> AtelierResult<HashMap<OpaqueKey, String>>;

    /// Delete a blob by key.
    async fn delete_by_key(&self, key: &OpaqueKey) -> AtelierResult<()>;
}

/// Options for a single upload.
///
/// # Examples
///
/// ```
/// use atelier_gateway::UploadOptions;
/// use atelier_core::OpaqueKey;
///
/// let options = UploadOptions::default()
///     .with_custom_key(Some(OpaqueKey::from("sections/report")))
///     .with_content_type("text/html".to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct UploadOptions {
    /// Overwrite this key in place instead of minting a new one
    pub custom_key: Option<OpaqueKey>,
    /// Original filename, used when minting a key
    pub filename: Option<String>,
    /// MIME content type of the blob; empty means unspecified
    pub content_type: String,
    /// Hint that the blob is a detailed-description document, which the
    /// backend may use to select storage policy
    pub detailed_description: bool,
}

/// Receipt returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// The key the blob is now addressable by
    public_id: OpaqueKey,
}

impl UploadReceipt {
    /// Create a receipt for the given key.
    pub fn new(public_id: OpaqueKey) -> Self {
        Self { public_id }
    }

    /// The key the blob is now addressable by.
    pub fn public_id(&self) -> &OpaqueKey {
        &self.public_id
    }

    /// Consume the receipt, returning the key.
    pub fn into_public_id(self) -> OpaqueKey {
        self.public_id
    }
}

//! Per-form asset staging state.

use crate::{DeletionLedger, PreviewUrl, PreviewUrls};
use atelier_core::{LocalFile, OpaqueKey, StagingPolicy};
use atelier_error::{AtelierResult, StagingError, StagingErrorKind};
use atelier_gateway::ObjectStoreGateway;

/// An asset that already belongs to the loaded entity.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExistingAsset {
    key: OpaqueKey,
    display_url: String,
}

/// A locally selected file, not yet part of the entity.
#[derive(Debug)]
struct PendingAsset {
    file: LocalFile,
    preview: PreviewUrl,
    /// Idempotency memo: set when a submission attempt uploads this file,
    /// so a retry after a failed commit does not upload it again.
    uploaded_key: Option<OpaqueKey>,
}

/// Where a staged asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AssetOrigin {
    /// Loaded from the entity, identified by an opaque key
    Existing,
    /// Locally selected, not yet uploaded
    Pending,
}

/// Read model over one staged asset slot, existing or pending.
#[derive(Debug, Clone, Copy)]
pub struct StagedAsset<'a> {
    /// Where the asset came from
    pub origin: AssetOrigin,
    /// URL usable in an image preview
    pub display_url: &'a str,
    /// The storage key, for existing assets
    pub key: Option<&'a OpaqueKey>,
    /// The local file, for pending assets
    pub file: Option<&'a LocalFile>,
}

/// In-memory staging state for one form instance's assets.
///
/// Tracks the entity's existing server-backed assets, locally staged files
/// awaiting upload, and the deletion ledger of keys to purge on a
/// successful save. Construct one store per form lifecycle; stores are
/// never shared between forms.
pub struct AssetStagingStore {
    policy: StagingPolicy,
    existing: Vec<ExistingAsset>,
    pending: Vec<PendingAsset>,
    ledger: DeletionLedger,
    snapshot: Vec<ExistingAsset>,
    previews: PreviewUrls,
}

impl AssetStagingStore {
    /// Create an empty store bounded by the given policy.
    pub fn new(policy: StagingPolicy) -> Self {
        Self {
            policy,
            existing: Vec::new(),
            pending: Vec::new(),
            ledger: DeletionLedger::new(),
            snapshot: Vec::new(),
            previews: PreviewUrls::new(),
        }
    }

    /// Load the entity's existing assets, resolving display URLs in one
    /// gateway round trip.
    ///
    /// Keys the gateway cannot resolve degrade to their raw string form.
    /// Loading records the reset snapshot, clears the deletion ledger, and
    /// discards any previously staged pending files.
    #[tracing::instrument(skip(self, gateway, keys), fields(count = keys.len()))]
    pub async fn load_existing(
        &mut self,
        gateway: &dyn ObjectStoreGateway,
        keys: &[OpaqueKey],
    ) {
        let mut urls = match gateway.resolve_urls(keys).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(error = %e, "Batch URL resolution failed, showing raw keys");
                Default::default()
            }
        };

        self.discard_pending();
        self.existing = keys
            .iter()
            .map(|key| ExistingAsset {
                key: key.clone(),
                display_url: urls
                    .remove(key)
                    .unwrap_or_else(|| key.to_string()),
            })
            .collect();
        self.snapshot = self.existing.clone();
        self.ledger.clear();

        tracing::debug!(loaded = self.existing.len(), "Loaded existing assets");
    }

    /// Stage a batch of locally selected files.
    ///
    /// The whole batch is validated against the policy first; any
    /// violation rejects the batch atomically, leaving staged state
    /// unchanged, so the caller surfaces exactly one error.
    ///
    /// # Errors
    ///
    /// Returns a staging error when the batch would exceed the asset
    /// maximum, a file exceeds the size limit, or a content type is not
    /// accepted.
    #[tracing::instrument(skip(self, files), fields(batch = files.len(), staged = self.len()))]
    pub fn stage_files(&mut self, files: Vec<LocalFile>) -> AtelierResult<()> {
        let total = self.existing.len() + self.pending.len() + files.len();
        if total > *self.policy.max_assets() {
            return Err(StagingError::new(StagingErrorKind::TooManyAssets(
                files.len(),
                *self.policy.max_assets(),
            ))
            .into());
        }

        for file in &files {
            if file.size_bytes() > *self.policy.max_file_bytes() {
                return Err(StagingError::new(StagingErrorKind::FileTooLarge(
                    file.name().clone(),
                    file.size_bytes(),
                    *self.policy.max_file_bytes(),
                ))
                .into());
            }
            if !self.policy.accepts_type(file.content_type()) {
                return Err(StagingError::new(StagingErrorKind::UnsupportedType(
                    file.name().clone(),
                    file.content_type().clone(),
                ))
                .into());
            }
        }

        for file in files {
            let preview = self.previews.mint();
            self.pending.push(PendingAsset {
                file,
                preview,
                uploaded_key: None,
            });
        }

        tracing::debug!(staged = self.len(), "Staged files");
        Ok(())
    }

    /// Remove the asset slot at `index` over the combined display list
    /// (existing first, then pending).
    ///
    /// Removing an existing asset ledgers its key; removing a pending
    /// asset releases its preview URL immediately and never touches the
    /// ledger.
    ///
    /// # Errors
    ///
    /// Returns a staging error if the index is out of range.
    #[tracing::instrument(skip(self))]
    pub fn remove_at(&mut self, index: usize) -> AtelierResult<()> {
        if index < self.existing.len() {
            let removed = self.existing.remove(index);
            self.ledger.insert(removed.key);
            return Ok(());
        }

        let pending_index = index - self.existing.len();
        if pending_index >= self.pending.len() {
            return Err(StagingError::new(StagingErrorKind::IndexOutOfRange(index)).into());
        }

        let removed = self.pending.remove(pending_index);
        self.release_preview(removed.preview);
        Ok(())
    }

    /// Cancel path: restore the last-loaded existing set, discard pending
    /// files and the deletion ledger. No server contact; abandoned edits
    /// leave server-side assets untouched.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        self.discard_pending();
        self.existing = self.snapshot.clone();
        self.ledger.clear();
        tracing::debug!(restored = self.existing.len(), "Reset staging state");
    }

    /// Iterate staged assets in display order: existing first, then
    /// pending.
    pub fn assets(&self) -> impl Iterator<Item = StagedAsset<'_>> {
        let existing = self.existing.iter().map(|asset| StagedAsset {
            origin: AssetOrigin::Existing,
            display_url: &asset.display_url,
            key: Some(&asset.key),
            file: None,
        });
        let pending = self.pending.iter().map(|asset| StagedAsset {
            origin: AssetOrigin::Pending,
            display_url: asset.preview.as_str(),
            key: None,
            file: Some(&asset.file),
        });
        existing.chain(pending)
    }

    /// Total staged assets, existing plus pending.
    pub fn len(&self) -> usize {
        self.existing.len() + self.pending.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.pending.is_empty()
    }

    /// The deletion ledger.
    pub fn ledger(&self) -> &DeletionLedger {
        &self.ledger
    }

    /// Preview URLs currently held by pending assets.
    pub fn active_preview_count(&self) -> usize {
        self.previews.active_count()
    }

    /// Existing asset keys in display order, excluding ledgered keys.
    ///
    /// A removal always wins over a stale existing-key reference.
    pub(crate) fn existing_keys(&self) -> Vec<OpaqueKey> {
        self.existing
            .iter()
            .filter(|asset| !self.ledger.contains(&asset.key))
            .map(|asset| asset.key.clone())
            .collect()
    }

    /// Pending files that still need an upload, as (pending index, file).
    pub(crate) fn pending_needing_upload(&self) -> Vec<(usize, &LocalFile)> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, asset)| asset.uploaded_key.is_none())
            .map(|(index, asset)| (index, &asset.file))
            .collect()
    }

    /// Record the key a submission attempt uploaded for a pending file.
    pub(crate) fn record_upload(&mut self, pending_index: usize, key: OpaqueKey) {
        if let Some(asset) = self.pending.get_mut(pending_index) {
            asset.uploaded_key = Some(key);
        }
    }

    /// Uploaded keys of all pending files, in display order. None if any
    /// pending file has not been uploaded yet.
    pub(crate) fn uploaded_keys(&self) -> Option<Vec<OpaqueKey>> {
        self.pending
            .iter()
            .map(|asset| asset.uploaded_key.clone())
            .collect()
    }

    /// Successful-submission epilogue: pending assets become existing
    /// under their uploaded keys, previews are released, the ledger is
    /// cleared, and the snapshot is refreshed.
    ///
    /// Display URLs of the promoted assets fall back to their raw keys
    /// until the next `load_existing` re-resolves them.
    pub(crate) fn commit_success(&mut self) {
        let promoted: Vec<PendingAsset> = self.pending.drain(..).collect();
        for asset in promoted {
            self.release_preview(asset.preview);
            if let Some(key) = asset.uploaded_key {
                let display_url = key.to_string();
                self.existing.push(ExistingAsset { key, display_url });
            }
        }
        self.ledger.clear();
        self.snapshot = self.existing.clone();
        tracing::debug!(existing = self.existing.len(), "Committed staged assets");
    }

    fn discard_pending(&mut self) {
        let discarded: Vec<PendingAsset> = self.pending.drain(..).collect();
        for asset in discarded {
            self.release_preview(asset.preview);
        }
    }

    fn release_preview(&mut self, preview: PreviewUrl) {
        if let Err(e) = self.previews.release(preview) {
            tracing::warn!(error = %e, "Preview release failed");
        }
    }
}

impl Drop for AssetStagingStore {
    fn drop(&mut self) {
        // Form teardown releases whatever previews are still live.
        self.discard_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_file(name: &str) -> LocalFile {
        LocalFile::new(name, "image/png", vec![0u8; 16])
    }

    fn store_with_max(max: usize) -> AssetStagingStore {
        AssetStagingStore::new(StagingPolicy::default().with_max_assets(max))
    }

    #[test]
    fn staging_past_the_maximum_rejects_the_whole_batch() {
        let mut store = store_with_max(2);
        store.stage_files(vec![small_file("a.png")]).unwrap();

        let err = store
            .stage_files(vec![small_file("b.png"), small_file("c.png")])
            .unwrap_err();
        assert!(format!("{err}").contains("Too many assets"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_preview_count(), 1);
    }

    #[test]
    fn oversized_file_rejects_the_batch_atomically() {
        let mut store =
            AssetStagingStore::new(StagingPolicy::default().with_max_file_bytes(8));

        let err = store
            .stage_files(vec![
                LocalFile::new("ok.png", "image/png", vec![0u8; 4]),
                LocalFile::new("big.png", "image/png", vec![0u8; 64]),
            ])
            .unwrap_err();
        assert!(format!("{err}").contains("File too large"));
        assert!(store.is_empty());
        assert_eq!(store.active_preview_count(), 0);
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let mut store = store_with_max(10);
        let err = store
            .stage_files(vec![LocalFile::new("clip.mp4", "video/mp4", vec![0u8; 4])])
            .unwrap_err();
        assert!(format!("{err}").contains("Unsupported file type"));
        assert!(store.is_empty());
    }

    #[test]
    fn removing_pending_releases_the_preview_and_skips_the_ledger() {
        let mut store = store_with_max(10);
        store.stage_files(vec![small_file("a.png")]).unwrap();
        assert_eq!(store.active_preview_count(), 1);

        store.remove_at(0).unwrap();
        assert!(store.ledger().is_empty());
        assert_eq!(store.active_preview_count(), 0);
    }

    #[test]
    fn remove_out_of_range_errors() {
        let mut store = store_with_max(10);
        assert!(store.remove_at(0).is_err());
    }

    #[test]
    fn display_order_is_existing_then_pending() {
        let mut store = store_with_max(10);
        store.stage_files(vec![small_file("a.png")]).unwrap();

        let origins: Vec<AssetOrigin> = store.assets().map(|a| a.origin).collect();
        assert_eq!(origins, vec![AssetOrigin::Pending]);
        assert_eq!(format!("{}", AssetOrigin::Existing), "existing");
    }
}

//! Commit-time submission sequence.

use crate::FormDraft;
use crate::sections::upload_html_blob;
use atelier_core::OpaqueKey;
use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
use atelier_gateway::{Entity, EntityApi, EntityPayload, ObjectStoreGateway, UploadOptions};
use futures_util::future::join_all;
use std::sync::Arc;

/// Runs the commit-time algorithm behind "Save"/"Update".
///
/// One `submit` call per user action: pre-flight validation, fan-out
/// upload of pending files, rich-text serialization, payload assembly,
/// and exactly one create/update API call. Any upload failure aborts the
/// submission before the API call fires; staged state is preserved so a
/// retry needs no re-selection, and idempotency memos keep a retry from
/// re-uploading files that already succeeded.
pub struct SubmissionOrchestrator {
    gateway: Arc<dyn ObjectStoreGateway>,
    api: Arc<dyn EntityApi>,
}

impl SubmissionOrchestrator {
    /// Create an orchestrator over the given gateway and entity API.
    pub fn new(gateway: Arc<dyn ObjectStoreGateway>, api: Arc<dyn EntityApi>) -> Self {
        Self { gateway, api }
    }

    /// Submit the draft: create the entity for client drafts, update it
    /// for server drafts.
    ///
    /// The steps are strictly ordered; a failure aborts the remaining
    /// steps and surfaces exactly one error, with all staged state left
    /// intact for retry. Nothing already uploaded is rolled back.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call, a gateway
    /// error if an upload fails, or a commit error from the entity API.
    #[tracing::instrument(
        skip(self, draft),
        fields(identity = %draft.identity(), editing = draft.identity().is_edit())
    )]
    pub async fn submit(&self, draft: &mut FormDraft) -> AtelierResult<Entity> {
        // Fail fast, before any network call.
        draft.rules().validate(draft.fields(), draft.assets().len())?;

        // The prefix is decided once and reused for every upload below,
        // so all new assets of this submission share one address.
        let prefix = draft.identity().storage_prefix();

        self.upload_pending_files(draft, &prefix).await?;

        let mut image_keys = draft.assets().existing_keys();
        let uploaded = draft.assets().uploaded_keys().ok_or_else(|| {
            GatewayError::new(GatewayErrorKind::Upload(
                "pending file missing its uploaded key".to_string(),
            ))
        })?;
        image_keys.extend(uploaded);

        let description_key = self.serialize_description(draft, &prefix).await?;

        let mut sections = Vec::with_capacity(draft.sections().len());
        for section in draft.sections().sections() {
            let record = draft
                .sections()
                .serialize_for_submit(section, &prefix, self.gateway.as_ref())
                .await?;
            sections.push(record);
        }

        let payload = EntityPayload {
            draft_id: (!draft.identity().is_edit())
                .then(|| draft.identity().storage_prefix()),
            fields: draft.fields().clone(),
            image_keys,
            description_key,
            sections,
            deleted_images: draft.assets().ledger().keys().to_vec(),
        };

        let entity = match draft.identity().server_id() {
            Some(id) => self.api.update(id, &payload).await?,
            None => self.api.create(&payload).await?,
        };

        draft.assets_mut().commit_success();
        tracing::info!(entity_id = %entity.id, "Submission committed");

        Ok(entity)
    }

    /// Step 2: upload every pending file lacking an idempotency memo.
    ///
    /// Uploads fan out concurrently; the step resolves only once every
    /// upload has settled. Keys of successful uploads are recorded even
    /// when a sibling upload fails, so a retry skips them.
    async fn upload_pending_files(
        &self,
        draft: &mut FormDraft,
        prefix: &str,
    ) -> AtelierResult<()> {
        let jobs = draft.assets().pending_needing_upload();
        if jobs.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = jobs.len(), "Uploading pending files");

        let uploads = jobs.into_iter().map(|(index, file)| {
            let gateway = Arc::clone(&self.gateway);
            async move {
                let options = UploadOptions::default()
                    .with_filename(Some(file.name().clone()))
                    .with_content_type(file.content_type().clone());
                let result = gateway.upload(file.bytes(), prefix, &options).await;
                (index, result)
            }
        });
        let settled = join_all(uploads).await;

        let mut first_error = None;
        for (index, result) in settled {
            match result {
                Ok(receipt) => {
                    draft
                        .assets_mut()
                        .record_upload(index, receipt.into_public_id());
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Pending upload failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Step 4: serialize the single detailed-description field, when
    /// non-empty, overwriting its previous key when one existed.
    async fn serialize_description(
        &self,
        draft: &FormDraft,
        prefix: &str,
    ) -> AtelierResult<Option<OpaqueKey>> {
        let description = draft.description();
        if description.is_empty() {
            return Ok(None);
        }

        let key = upload_html_blob(
            self.gateway.as_ref(),
            prefix,
            description.body.as_untagged(),
            description.original_key.as_ref(),
            true,
        )
        .await?;

        Ok(Some(key))
    }
}

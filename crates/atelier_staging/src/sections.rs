//! Ordered rich-text section management.

use crate::ContentResolver;
use atelier_core::{ContentSection, OpaqueKey, SectionRecord, StoredReference, StoredSection};
use atelier_error::{AtelierResult, StagingError, StagingErrorKind};
use atelier_gateway::{ObjectStoreGateway, UploadOptions};

/// Serialize an HTML body to storage, overwriting `original_key` in place
/// when one exists so repeated saves reuse one key.
pub(crate) async fn upload_html_blob(
    gateway: &dyn ObjectStoreGateway,
    prefix: &str,
    html: &str,
    original_key: Option<&OpaqueKey>,
    detailed_description: bool,
) -> AtelierResult<OpaqueKey> {
    let options = UploadOptions::default()
        .with_custom_key(original_key.cloned())
        .with_filename(original_key.map(|key| key.last_segment().to_string()))
        .with_content_type("text/html".to_string())
        .with_detailed_description(detailed_description);

    let receipt = gateway.upload(html.as_bytes(), prefix, &options).await?;
    Ok(receipt.into_public_id())
}

/// Manages the ordered list of rich-text sections for one form instance.
///
/// Each section's body may already exist in storage as an opaque key; the
/// synchronizer tracks that original key per section so edits overwrite
/// the stored blob instead of minting a new one per save.
#[derive(Debug, Default)]
pub struct SectionSynchronizer {
    sections: Vec<ContentSection>,
}

impl SectionSynchronizer {
    /// Create an empty synchronizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load sections from an entity, resolving every body to displayable
    /// content so the editor shows rendered rich text, never a raw key.
    ///
    /// Bodies that classify as keys keep that key as their overwrite
    /// target.
    #[tracing::instrument(skip(self, raw, resolver), fields(count = raw.len()))]
    pub async fn load_sections(&mut self, raw: &[StoredSection], resolver: &ContentResolver) {
        let mut sections = Vec::with_capacity(raw.len());
        for stored in raw {
            let mut section = ContentSection::from_stored(stored);
            let display = resolver.resolve_display_content(&section.body).await;
            section.body = StoredReference::Inline(display);
            sections.push(section);
        }
        self.sections = sections;
        tracing::debug!(loaded = self.sections.len(), "Loaded sections");
    }

    /// Append a fresh, empty section.
    pub fn append_section(&mut self) {
        self.sections.push(ContentSection::new(String::new()));
    }

    /// Remove the section at `index`.
    ///
    /// The removed section's body key, if any, is not ledgered for
    /// deletion; orphaned section bodies are left to server-side cleanup.
    ///
    /// # Errors
    ///
    /// Returns a staging error if the index is out of range.
    pub fn remove_section(&mut self, index: usize) -> AtelierResult<()> {
        if index >= self.sections.len() {
            return Err(StagingError::new(StagingErrorKind::IndexOutOfRange(index)).into());
        }
        self.sections.remove(index);
        Ok(())
    }

    /// The sections in order.
    pub fn sections(&self) -> &[ContentSection] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Set the title of the section at `index`.
    ///
    /// # Errors
    ///
    /// Returns a staging error if the index is out of range.
    pub fn set_title(&mut self, index: usize, title: impl Into<String>) -> AtelierResult<()> {
        let section = self.section_mut(index)?;
        section.title = title.into();
        Ok(())
    }

    /// Replace the body of the section at `index` with the editor's
    /// current HTML value.
    ///
    /// # Errors
    ///
    /// Returns a staging error if the index is out of range.
    pub fn set_body(&mut self, index: usize, html: impl Into<String>) -> AtelierResult<()> {
        let section = self.section_mut(index)?;
        section.set_body(html);
        Ok(())
    }

    /// Serialize one section for submission.
    ///
    /// An empty body passes through unchanged with no upload. Otherwise
    /// the body is packaged as a `text/html` blob: sections loaded from a
    /// key overwrite that same key, keeping the original filename; new
    /// sections mint a key under the submission's prefix.
    #[tracing::instrument(skip(self, section, gateway), fields(title = %section.title, overwrite = section.original_key.is_some()))]
    pub async fn serialize_for_submit(
        &self,
        section: &ContentSection,
        prefix: &str,
        gateway: &dyn ObjectStoreGateway,
    ) -> AtelierResult<SectionRecord> {
        if section.body.is_empty() {
            return Ok(SectionRecord {
                title: section.title.clone(),
                description: section.body.as_untagged().to_string(),
            });
        }

        let key = upload_html_blob(
            gateway,
            prefix,
            section.body.as_untagged(),
            section.original_key.as_ref(),
            false,
        )
        .await?;

        Ok(SectionRecord {
            title: section.title.clone(),
            description: key.into_inner(),
        })
    }

    fn section_mut(&mut self, index: usize) -> AtelierResult<&mut ContentSection> {
        let len = self.sections.len();
        self.sections
            .get_mut(index)
            .ok_or_else(|| {
                tracing::debug!(index, len, "Section index out of range");
                StagingError::new(StagingErrorKind::IndexOutOfRange(index)).into()
            })
    }
}

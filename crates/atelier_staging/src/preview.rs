//! Ephemeral local preview URLs.
//!
//! A pending file gets a process-local preview URL so the form can render
//! it before upload. These URLs stand in for browser blob URLs: each one
//! holds a resource that must be released exactly once. Release takes the
//! URL by value, so double release does not compile; leaks are visible
//! through [`PreviewUrls::active_count`].

use atelier_error::{AtelierResult, StagingError, StagingErrorKind};
use std::collections::HashSet;
use uuid::Uuid;

/// A minted preview URL. Not cloneable; surrender it to
/// [`PreviewUrls::release`] when the slot goes away.
#[derive(Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", url)]
pub struct PreviewUrl {
    url: String,
}

impl PreviewUrl {
    /// The URL string, usable as an image source.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

/// Allocator and registry for preview URLs of one form instance.
#[derive(Debug, Default)]
pub struct PreviewUrls {
    active: HashSet<String>,
}

impl PreviewUrls {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh preview URL.
    pub fn mint(&mut self) -> PreviewUrl {
        let url = format!("preview://{}", Uuid::new_v4());
        self.active.insert(url.clone());
        tracing::debug!(url = %url, active = self.active.len(), "Minted preview URL");
        PreviewUrl { url }
    }

    /// Release a preview URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL was not minted by this allocator.
    pub fn release(&mut self, preview: PreviewUrl) -> AtelierResult<()> {
        if !self.active.remove(&preview.url) {
            return Err(
                StagingError::new(StagingErrorKind::UnknownPreview(preview.url)).into(),
            );
        }
        tracing::debug!(url = %preview.url, active = self.active.len(), "Released preview URL");
        Ok(())
    }

    /// Number of URLs minted and not yet released.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

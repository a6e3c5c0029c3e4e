//! Display-content resolution.

use atelier_core::{OpaqueKey, StoredReference};
use atelier_gateway::{ContentFetcher, ObjectStoreGateway};
use std::sync::Arc;

/// Turns stored references into displayable content.
///
/// Handles the inline/URL/key ambiguity uniformly and never fails: every
/// failure path degrades to returning *some* string — the raw URL or key —
/// logged as a warning. A caller may briefly show a non-HTML fallback
/// value; the next load corrects it.
#[derive(Clone)]
pub struct ContentResolver {
    gateway: Arc<dyn ObjectStoreGateway>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl ContentResolver {
    /// Create a resolver over the given gateway and fetcher.
    pub fn new(gateway: Arc<dyn ObjectStoreGateway>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { gateway, fetcher }
    }

    /// Resolve a stored reference to displayable content.
    ///
    /// Inline markup is returned unchanged with no network call. URLs are
    /// fetched; keys are resolved through the gateway, then fetched. Any
    /// failure falls back to the reference's raw string form.
    #[tracing::instrument(skip(self, reference))]
    pub async fn resolve_display_content(&self, reference: &StoredReference) -> String {
        match reference {
            StoredReference::Inline(html) => html.clone(),
            StoredReference::Url(url) => match self.fetcher.fetch_text(url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Content fetch failed, showing URL");
                    url.clone()
                }
            },
            StoredReference::Key(key) => {
                let url = match self.gateway.resolve_url(key).await {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Key resolution failed, showing key");
                        return key.to_string();
                    }
                };
                match self.fetcher.fetch_text(&url).await {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!(key = %key, url = %url, error = %e, "Content fetch failed, showing key");
                        key.to_string()
                    }
                }
            }
        }
    }

    /// Resolve a key to a display URL for image-style assets.
    ///
    /// On failure the raw key string is returned, so the UI shows a broken
    /// image instead of crashing.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_display_url(&self, key: &OpaqueKey) -> String {
        match self.gateway.resolve_url(key).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "URL resolution failed, showing key");
                key.to_string()
            }
        }
    }
}

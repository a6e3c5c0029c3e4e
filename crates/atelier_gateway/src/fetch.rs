//! URL content fetching.

use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};

/// Trait for fetching text content from a resolved URL.
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the text body behind a URL.
    async fn fetch_text(&self, url: &str) -> AtelierResult<String>;
}

/// HTTP content fetcher backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpContentFetcher {
    client: reqwest::Client,
}

impl HttpContentFetcher {
    /// Create a fetcher with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher reusing an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ContentFetcher for HttpContentFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch_text(&self, url: &str) -> AtelierResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::new(GatewayErrorKind::Fetch(format!("{url}: {e}"))))?;

        let response = response.error_for_status().map_err(|e| {
            GatewayError::new(GatewayErrorKind::Fetch(format!("{url}: {e}")))
        })?;

        response
            .text()
            .await
            .map_err(|e| {
                GatewayError::new(GatewayErrorKind::Fetch(format!("{url}: {e}"))).into()
            })
    }
}

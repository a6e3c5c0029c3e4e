//! In-memory object store backend.
//!
//! Keeps objects in a process-local map so the engine can be exercised
//! without I/O. Pairs with [`MemoryFetcher`] to close the resolve/fetch
//! loop: resolved URLs use a `memory://` scheme the fetcher understands.

use crate::{ContentFetcher, ObjectStoreGateway, UploadOptions, UploadReceipt};
use atelier_core::OpaqueKey;
use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory object store.
///
/// Mints `{prefix}/{uuid}` keys, preserving the filename extension when
/// one is supplied; honors `custom_key` overwrite-in-place.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    objects: Mutex<HashMap<OpaqueKey, StoredObject>>,
}

impl MemoryGateway {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes stored under a key, if present.
    pub fn object(&self, key: &OpaqueKey) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .map(|o| o.bytes.clone())
    }

    /// Content type stored under a key, if present.
    pub fn object_content_type(&self, key: &OpaqueKey) -> Option<String> {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .map(|o| o.content_type.clone())
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &OpaqueKey) -> bool {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(key)
    }

    /// Seed an object directly, bypassing upload. Useful for arranging
    /// preexisting entity state in tests.
    pub fn seed(&self, key: impl Into<OpaqueKey>, bytes: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(
                key.into(),
                StoredObject {
                    bytes: bytes.into(),
                    content_type: String::new(),
                },
            );
    }

    fn mint_key(path_prefix: &str, options: &UploadOptions) -> OpaqueKey {
        let id = Uuid::new_v4();
        let ext = options
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty());
        match ext {
            Some(ext) => OpaqueKey::new(format!("{path_prefix}/{id}.{ext}")),
            None => OpaqueKey::new(format!("{path_prefix}/{id}")),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStoreGateway for MemoryGateway {
    #[tracing::instrument(skip(self, data, options), fields(size = data.len(), prefix = path_prefix))]
    async fn upload(
        &self,
        data: &[u8],
        path_prefix: &str,
        options: &UploadOptions,
    ) -> AtelierResult<UploadReceipt> {
        let key = match &options.custom_key {
            Some(key) => key.clone(),
            None => Self::mint_key(path_prefix, options),
        };

        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(
                key.clone(),
                StoredObject {
                    bytes: data.to_vec(),
                    content_type: options.content_type.clone(),
                },
            );

        tracing::debug!(key = %key, overwrite = options.custom_key.is_some(), "Stored object");
        Ok(UploadReceipt::new(key))
    }

    async fn resolve_url(&self, key: &OpaqueKey) -> AtelierResult<String> {
        let objects = self.objects.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if objects.contains_key(key) {
            Ok(format!("memory://{key}"))
        } else {
            Err(GatewayError::new(GatewayErrorKind::NotFound(key.to_string())).into())
        }
    }

    async fn resolve_urls(
        &self,
        keys: &[OpaqueKey],
    ) -> AtelierResult<HashMap<OpaqueKey, String>> {
        let objects = self.objects.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(keys
            .iter()
            .filter(|key| objects.contains_key(*key))
            .map(|key| (key.clone(), format!("memory://{key}")))
            .collect())
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn delete_by_key(&self, key: &OpaqueKey) -> AtelierResult<()> {
        let removed = self
            .objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        match removed {
            Some(_) => Ok(()),
            None => Err(GatewayError::new(GatewayErrorKind::NotFound(key.to_string())).into()),
        }
    }
}

/// Fetcher for `memory://` URLs resolved by a [`MemoryGateway`].
#[derive(Debug, Clone)]
pub struct MemoryFetcher {
    gateway: Arc<MemoryGateway>,
}

impl MemoryFetcher {
    /// Create a fetcher reading from the given gateway.
    pub fn new(gateway: Arc<MemoryGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ContentFetcher for MemoryFetcher {
    async fn fetch_text(&self, url: &str) -> AtelierResult<String> {
        let key = url.strip_prefix("memory://").ok_or_else(|| {
            GatewayError::new(GatewayErrorKind::Fetch(format!("unsupported URL: {url}")))
        })?;
        let bytes = self
            .gateway
            .object(&OpaqueKey::from(key))
            .ok_or_else(|| GatewayError::new(GatewayErrorKind::NotFound(key.to_string())))?;
        String::from_utf8(bytes).map_err(|e| {
            GatewayError::new(GatewayErrorKind::Fetch(format!("not valid UTF-8: {e}"))).into()
        })
    }
}

//! Filesystem-backed object store.
//!
//! Stores blobs under a base directory addressed by their key. Minted keys
//! are content-addressed within the submission's prefix, so re-uploading
//! identical bytes under the same prefix lands on the same key.
//!
//! # Example Structure
//!
//! ```text
//! /var/atelier/objects/
//! ├── news-42/
//! │   ├── 3f2a9c1d5e6b7a80.png
//! │   └── 9b1c2d3e4f5a6b70.html
//! └── 550e8400-e29b-41d4-a716-446655440000/
//!     └── a1b2c3d4e5f60718.jpeg
//! ```

use crate::{ObjectStoreGateway, UploadOptions, UploadReceipt};
use atelier_core::OpaqueKey;
use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;

/// Filesystem object store backend.
///
/// - **Content-addressed keys**: minted keys embed a SHA-256 prefix of the
///   blob, preserving the original file extension
/// - **Overwrite-in-place**: `custom_key` writes to the existing key's path
/// - **Atomic writes**: temp file + rename
pub struct FileSystemGateway {
    base_path: PathBuf,
}

impl FileSystemGateway {
    /// Create a filesystem backend rooted at `base_path`.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> AtelierResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            GatewayError::new(GatewayErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem gateway");
        Ok(Self { base_path })
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn mint_key(data: &[u8], path_prefix: &str, options: &UploadOptions) -> OpaqueKey {
        let hash = Self::compute_hash(data);
        let short = &hash[..16];
        let ext = options
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty());
        match ext {
            Some(ext) => OpaqueKey::new(format!("{path_prefix}/{short}.{ext}")),
            None => OpaqueKey::new(format!("{path_prefix}/{short}")),
        }
    }

    fn object_path(&self, key: &OpaqueKey) -> AtelierResult<PathBuf> {
        // Keys are server-minted, but a traversal check costs nothing.
        if key.as_str().split('/').any(|seg| seg == "..") {
            return Err(
                GatewayError::new(GatewayErrorKind::Resolve(format!("invalid key: {key}"))).into(),
            );
        }
        Ok(self.base_path.join(key.as_str()))
    }
}

#[async_trait::async_trait]
impl ObjectStoreGateway for FileSystemGateway {
    #[tracing::instrument(skip(self, data, options), fields(size = data.len(), prefix = path_prefix))]
    async fn upload(
        &self,
        data: &[u8],
        path_prefix: &str,
        options: &UploadOptions,
    ) -> AtelierResult<UploadReceipt> {
        let key = match &options.custom_key {
            Some(key) => key.clone(),
            None => Self::mint_key(data, path_prefix, options),
        };
        let path = self.object_path(&key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GatewayError::new(GatewayErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            GatewayError::new(GatewayErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            GatewayError::new(GatewayErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            key = %key,
            path = %path.display(),
            size = data.len(),
            overwrite = options.custom_key.is_some(),
            "Stored object"
        );

        Ok(UploadReceipt::new(key))
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn resolve_url(&self, key: &OpaqueKey) -> AtelierResult<String> {
        let path = self.object_path(key)?;

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(
                GatewayError::new(GatewayErrorKind::NotFound(key.to_string())).into(),
            );
        }

        Ok(format!("file://{}", path.display()))
    }

    async fn resolve_urls(
        &self,
        keys: &[OpaqueKey],
    ) -> AtelierResult<HashMap<OpaqueKey, String>> {
        let mut urls = HashMap::with_capacity(keys.len());
        for key in keys {
            let path = self.object_path(key)?;
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                urls.insert(key.clone(), format!("file://{}", path.display()));
            }
        }
        Ok(urls)
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn delete_by_key(&self, key: &OpaqueKey) -> AtelierResult<()> {
        let path = self.object_path(key)?;

        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GatewayError::new(GatewayErrorKind::NotFound(key.to_string()))
            } else {
                GatewayError::new(GatewayErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!(key = %key, path = %path.display(), "Deleted object");

        Ok(())
    }
}

impl FileSystemGateway {
    /// Read the raw bytes stored under a key.
    ///
    /// # Errors
    ///
    /// Returns error if the object does not exist or cannot be read.
    pub async fn retrieve(&self, key: &OpaqueKey) -> AtelierResult<Vec<u8>> {
        let path = self.object_path(key)?;

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GatewayError::new(GatewayErrorKind::NotFound(key.to_string())).into()
            } else {
                GatewayError::new(GatewayErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into()
            }
        })
    }
}

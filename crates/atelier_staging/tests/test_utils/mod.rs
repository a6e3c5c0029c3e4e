//! Shared test doubles for the staging engine tests.
#![allow(dead_code)]

use atelier_core::OpaqueKey;
use atelier_error::{
    AtelierResult, CommitError, CommitErrorKind, GatewayError, GatewayErrorKind,
};
use atelier_gateway::{
    Entity, EntityApi, EntityPayload, MemoryGateway, ObjectStoreGateway, UploadOptions,
    UploadReceipt,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// One observed upload call.
#[derive(Debug, Clone)]
pub struct UploadCall {
    pub prefix: String,
    pub custom_key: Option<OpaqueKey>,
    pub filename: Option<String>,
    pub content_type: String,
    pub detailed_description: bool,
}

/// Gateway wrapper that records every upload and can be told to fail
/// uploads of specific filenames.
#[derive(Default)]
pub struct RecordingGateway {
    inner: Arc<MemoryGateway>,
    calls: Mutex<Vec<UploadCall>>,
    fail_filenames: Mutex<HashSet<String>>,
    fail_resolution: Mutex<bool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared memory store, for pairing with a `MemoryFetcher`.
    pub fn inner(&self) -> Arc<MemoryGateway> {
        Arc::clone(&self.inner)
    }

    /// Fail any upload whose filename equals `name`.
    pub fn fail_uploads_named(&self, name: &str) {
        self.fail_filenames.lock().unwrap().insert(name.to_string());
    }

    /// Fail every key resolution.
    pub fn fail_resolution(&self) {
        *self.fail_resolution.lock().unwrap() = true;
    }

    /// Stop injecting failures.
    pub fn clear_failures(&self) {
        self.fail_filenames.lock().unwrap().clear();
        *self.fail_resolution.lock().unwrap() = false;
    }

    pub fn upload_calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn seed(&self, key: &str, bytes: &[u8]) {
        self.inner.seed(key, bytes.to_vec());
    }
}

#[async_trait::async_trait]
impl ObjectStoreGateway for RecordingGateway {
    async fn upload(
        &self,
        data: &[u8],
        path_prefix: &str,
        options: &UploadOptions,
    ) -> AtelierResult<UploadReceipt> {
        self.calls.lock().unwrap().push(UploadCall {
            prefix: path_prefix.to_string(),
            custom_key: options.custom_key.clone(),
            filename: options.filename.clone(),
            content_type: options.content_type.clone(),
            detailed_description: options.detailed_description,
        });

        if let Some(name) = &options.filename
            && self.fail_filenames.lock().unwrap().contains(name)
        {
            return Err(
                GatewayError::new(GatewayErrorKind::Upload(format!("injected: {name}"))).into(),
            );
        }

        self.inner.upload(data, path_prefix, options).await
    }

    async fn resolve_url(&self, key: &OpaqueKey) -> AtelierResult<String> {
        if *self.fail_resolution.lock().unwrap() {
            return Err(
                GatewayError::new(GatewayErrorKind::Resolve(format!("injected: {key}"))).into(),
            );
        }
        self.inner.resolve_url(key).await
    }

    async fn resolve_urls(
        &self,
        keys: &[OpaqueKey],
    ) -> AtelierResult<HashMap<OpaqueKey, String>> {
        if *self.fail_resolution.lock().unwrap() {
            return Err(
                GatewayError::new(GatewayErrorKind::Resolve("injected".to_string())).into(),
            );
        }
        self.inner.resolve_urls(keys).await
    }

    async fn delete_by_key(&self, key: &OpaqueKey) -> AtelierResult<()> {
        self.inner.delete_by_key(key).await
    }
}

/// Entity API double recording every call; can be told to fail.
#[derive(Default)]
pub struct RecordingApi {
    created: Mutex<Vec<EntityPayload>>,
    updated: Mutex<Vec<(String, EntityPayload)>>,
    fail: Mutex<bool>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn created(&self) -> Vec<EntityPayload> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<(String, EntityPayload)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl EntityApi for RecordingApi {
    async fn create(&self, payload: &EntityPayload) -> AtelierResult<Entity> {
        if std::mem::take(&mut *self.fail.lock().unwrap()) {
            return Err(
                CommitError::new(CommitErrorKind::Create("injected".to_string())).into(),
            );
        }
        self.created.lock().unwrap().push(payload.clone());
        let id = payload
            .draft_id
            .clone()
            .unwrap_or_else(|| "created".to_string());
        Ok(Entity { id })
    }

    async fn update(&self, id: &str, payload: &EntityPayload) -> AtelierResult<Entity> {
        if std::mem::take(&mut *self.fail.lock().unwrap()) {
            return Err(
                CommitError::new(CommitErrorKind::Update("injected".to_string())).into(),
            );
        }
        self.updated
            .lock()
            .unwrap()
            .push((id.to_string(), payload.clone()));
        Ok(Entity { id: id.to_string() })
    }
}

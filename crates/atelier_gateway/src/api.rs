//! Entity CRUD API seam.

use atelier_core::{OpaqueKey, SectionRecord};
use atelier_error::AtelierResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The fully-resolved payload a submission hands to the entity API.
///
/// Assembled once per submission by the orchestrator: plain entity fields,
/// the final asset-key list, the serialized description key, section
/// records, and the deletion ledger the backend purges after a successful
/// save.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityPayload {
    /// The client draft identity for creations, so the backend can adopt
    /// it (or map it) as the entity's final id; absent on updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<String>,
    /// Entity fields as the backend schema expects them
    pub fields: Map<String, JsonValue>,
    /// Final asset-key list in display order
    pub image_keys: Vec<OpaqueKey>,
    /// Key of the serialized detailed-description blob, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_key: Option<OpaqueKey>,
    /// Serialized rich-text sections in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionRecord>,
    /// Keys for the backend to purge after the save succeeds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted_images: Vec<OpaqueKey>,
}

/// An entity as returned by the backend after create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity's server-assigned identifier
    pub id: String,
}

/// Trait for the external create/update API.
///
/// The orchestrator calls exactly one of these per submission: `create`
/// for client drafts, `update` for server drafts, never both.
#[async_trait::async_trait]
pub trait EntityApi: Send + Sync {
    /// Create a new entity from the assembled payload.
    async fn create(&self, payload: &EntityPayload) -> AtelierResult<Entity>;

    /// Update an existing entity with the assembled payload.
    async fn update(&self, id: &str, payload: &EntityPayload) -> AtelierResult<Entity>;
}

//! Draft identity for entities being created or edited.

use uuid::Uuid;

/// The addressing identity of the entity behind a form.
///
/// Every upload in a submission lands under one stable address prefix. For
/// an entity that already exists the prefix is its server-assigned id; for
/// a creation a client id is minted before any upload occurs so scratch
/// assets share a prefix the server can adopt or remap on create. The two
/// must never be conflated: an edit always addresses by the server id,
/// even if a client id was generated for scratch state earlier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DraftIdentity {
    /// The entity's real server-assigned identifier (editing)
    #[display("{}", _0)]
    Server(String),
    /// A client-generated identifier minted before the entity exists
    #[display("{}", _0)]
    Client(Uuid),
}

impl DraftIdentity {
    /// Mint a fresh client identity for a not-yet-created entity.
    pub fn new_client() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(draft_id = %id, "Minted client draft identity");
        Self::Client(id)
    }

    /// Identity for editing an existing entity.
    pub fn for_entity(id: impl Into<String>) -> Self {
        Self::Server(id.into())
    }

    /// Whether this draft edits an existing entity.
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// The storage-address prefix shared by every upload of one submission.
    pub fn storage_prefix(&self) -> String {
        match self {
            Self::Server(id) => id.clone(),
            Self::Client(id) => id.to_string(),
        }
    }

    /// The server id, when editing.
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::Server(id) => Some(id),
            Self::Client(_) => None,
        }
    }
}

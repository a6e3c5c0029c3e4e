//! Per-form draft state.

use crate::{AssetStagingStore, ContentResolver, FormRules, SectionSynchronizer};
use atelier_core::{DraftIdentity, OpaqueKey, StagingPolicy, StoredReference};
use serde_json::{Map, Value as JsonValue};

/// The single detailed-description rich-text field some modules carry,
/// as opposed to multi-section content.
///
/// Like a section body, it remembers the key it was loaded from so a
/// re-save overwrites instead of minting a new blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedDescription {
    /// Current body; editor values are inline markup until serialized
    pub body: StoredReference,
    /// Key the body was loaded from, when it was a key
    pub original_key: Option<OpaqueKey>,
}

impl DetailedDescription {
    /// Build from a loaded entity's untagged description.
    pub fn from_untagged(raw: impl Into<String>) -> Self {
        let body = StoredReference::from_untagged(raw.into());
        let original_key = body.key().cloned();
        Self { body, original_key }
    }

    /// Replace the body with the editor's current HTML value.
    pub fn set_body(&mut self, html: impl Into<String>) {
        self.body = StoredReference::Inline(html.into());
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// All mutable state behind one open form: identity, plain fields, the
/// detailed description, staged assets, and rich-text sections.
///
/// One instance per form lifecycle. Submission takes the draft's unique
/// mutable borrow, so re-submission while a submission is in flight does
/// not compile.
pub struct FormDraft {
    identity: DraftIdentity,
    rules: FormRules,
    fields: Map<String, JsonValue>,
    description: DetailedDescription,
    assets: AssetStagingStore,
    sections: SectionSynchronizer,
}

impl FormDraft {
    /// A draft for creating a new entity; mints the client identity that
    /// prefixes every upload until the server assigns a real id.
    pub fn create(rules: FormRules, policy: StagingPolicy) -> Self {
        Self::with_identity(DraftIdentity::new_client(), rules, policy)
    }

    /// A draft for editing an existing entity, addressed by its server id.
    pub fn edit(id: impl Into<String>, rules: FormRules, policy: StagingPolicy) -> Self {
        Self::with_identity(DraftIdentity::for_entity(id), rules, policy)
    }

    fn with_identity(identity: DraftIdentity, rules: FormRules, policy: StagingPolicy) -> Self {
        Self {
            identity,
            rules,
            fields: Map::new(),
            description: DetailedDescription::default(),
            assets: AssetStagingStore::new(policy),
            sections: SectionSynchronizer::new(),
        }
    }

    /// The draft's addressing identity.
    pub fn identity(&self) -> &DraftIdentity {
        &self.identity
    }

    /// The validation rules.
    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// The plain entity fields.
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }

    /// Set a plain entity field.
    pub fn set_field(&mut self, name: impl Into<String>, value: JsonValue) {
        self.fields.insert(name.into(), value);
    }

    /// The detailed description.
    pub fn description(&self) -> &DetailedDescription {
        &self.description
    }

    /// Replace the detailed description body with the editor's HTML value.
    pub fn set_description_body(&mut self, html: impl Into<String>) {
        self.description.set_body(html);
    }

    /// Load the detailed description from its stored untagged form,
    /// resolving it to displayable content for the editor.
    pub async fn load_description(&mut self, raw: impl Into<String>, resolver: &ContentResolver) {
        let mut description = DetailedDescription::from_untagged(raw.into());
        let display = resolver.resolve_display_content(&description.body).await;
        description.body = StoredReference::Inline(display);
        self.description = description;
    }

    /// The asset staging store.
    pub fn assets(&self) -> &AssetStagingStore {
        &self.assets
    }

    /// Mutable access to the asset staging store.
    pub fn assets_mut(&mut self) -> &mut AssetStagingStore {
        &mut self.assets
    }

    /// The section synchronizer.
    pub fn sections(&self) -> &SectionSynchronizer {
        &self.sections
    }

    /// Mutable access to the section synchronizer.
    pub fn sections_mut(&mut self) -> &mut SectionSynchronizer {
        &mut self.sections
    }

    /// Cancel path: discard staged assets and the ledger without server
    /// contact. Entity fields and sections are left for the caller to
    /// re-populate from the entity snapshot it holds.
    pub fn reset(&mut self) {
        self.assets.reset();
    }
}

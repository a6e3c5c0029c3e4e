//! Titled rich-text sections and their wire forms.

use crate::{OpaqueKey, StoredReference};
use serde::{Deserialize, Serialize};

/// A section as loaded from an entity: title plus an untagged description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSection {
    /// Section title
    pub title: String,
    /// Untagged stored reference: markup, URL, or storage key
    pub description: String,
}

/// One titled rich-text block being edited in a form.
///
/// `original_key` is populated only when the section was loaded from a body
/// that classified as a storage key. It is the overwrite target on save, so
/// repeated edit-save cycles of the same section reuse one key instead of
/// minting a new blob per save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    /// Section title
    pub title: String,
    /// Current body; the editor's value is treated as inline markup until
    /// serialized
    pub body: StoredReference,
    /// Key the body was loaded from, when it was a key
    pub original_key: Option<OpaqueKey>,
}

impl ContentSection {
    /// A fresh, empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: StoredReference::default(),
            original_key: None,
        }
    }

    /// Build a section from a loaded entity's untagged description,
    /// remembering the original key when the description is one.
    pub fn from_stored(stored: &StoredSection) -> Self {
        let body = StoredReference::from_untagged(stored.description.clone());
        let original_key = body.key().cloned();
        Self {
            title: stored.title.clone(),
            body,
            original_key,
        }
    }

    /// Replace the body with the editor's current HTML value.
    pub fn set_body(&mut self, html: impl Into<String>) {
        self.body = StoredReference::Inline(html.into());
    }
}

/// The serialized form of a section inside an entity payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section title
    pub title: String,
    /// Untagged body reference: a storage key after upload, or the empty
    /// string for an empty section
    pub description: String,
}

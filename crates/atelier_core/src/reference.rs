//! Stored content references.

use crate::OpaqueKey;
use serde::{Deserialize, Serialize};

/// A reference to displayable content, tagged by kind.
///
/// The same entity field holds three semantically different values across
/// its lifecycle: freshly typed markup, an already-resolvable URL, or a
/// persisted storage key. Legacy data is untagged, so the shape classifier
/// [`StoredReference::from_untagged`] survives as a migration adapter at
/// the API boundary; everywhere else the variant is explicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StoredReference {
    /// Literal rich-text markup, not yet persisted
    Inline(String),
    /// A fully-qualified URL, resolvable without the gateway
    Url(String),
    /// A gateway-assigned key requiring resolution before display
    Key(OpaqueKey),
}

impl StoredReference {
    /// Classify an untagged string by shape.
    ///
    /// Exactly one variant holds for any input: content beginning with `<`
    /// (after trimming) is inline markup, `http://`/`https://` prefixes are
    /// URLs, anything else is an opaque key. Classification is a pure
    /// function of content, never of provenance.
    pub fn from_untagged(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.starts_with('<') {
            Self::Inline(raw)
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(raw)
        } else {
            Self::Key(OpaqueKey::new(raw))
        }
    }

    /// The untagged string form, for wire compatibility with legacy data.
    pub fn as_untagged(&self) -> &str {
        match self {
            Self::Inline(html) => html,
            Self::Url(url) => url,
            Self::Key(key) => key.as_str(),
        }
    }

    /// The storage key, when this reference is one.
    pub fn key(&self) -> Option<&OpaqueKey> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Whether the referenced content is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.as_untagged().trim().is_empty()
    }
}

impl Default for StoredReference {
    fn default() -> Self {
        Self::Inline(String::new())
    }
}

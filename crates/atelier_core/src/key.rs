//! Opaque storage key type.

use serde::{Deserialize, Serialize};

/// A storage-assigned identifier for a blob.
///
/// Keys are minted by the object store gateway and are meaningless without
/// gateway resolution. They are path-like (`news/2024/cover.png`) but the
/// engine never interprets the path structure beyond the last segment.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct OpaqueKey(String);

impl OpaqueKey {
    /// Create a key from its string form.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The last path segment of the key.
    ///
    /// Used as the filename when overwriting a blob in place, so repeated
    /// saves of the same section keep the original name.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Whether the key starts with the given address prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl From<String> for OpaqueKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for OpaqueKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

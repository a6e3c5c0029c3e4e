//! Deletion ledger.

use atelier_core::OpaqueKey;

/// The set of keys to purge server-side after a successful save.
///
/// Keys accumulate when an existing asset or a described body is removed
/// or superseded. The ledger travels with the entity payload; the client
/// never deletes directly. It is cleared only after a successful
/// submission, so an abandoned edit leaves server-side assets untouched.
/// Insertion order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionLedger {
    keys: Vec<OpaqueKey>,
}

impl DeletionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key for deletion. Returns false if it was already present.
    pub fn insert(&mut self, key: OpaqueKey) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        tracing::debug!(key = %key, "Ledgered key for deletion");
        self.keys.push(key);
        true
    }

    /// Whether the key is ledgered.
    pub fn contains(&self, key: &OpaqueKey) -> bool {
        self.keys.contains(key)
    }

    /// The ledgered keys in insertion order.
    pub fn keys(&self) -> &[OpaqueKey] {
        &self.keys
    }

    /// Number of ledgered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

//! Deferred per-field error recording.
//!
//! Attribute setters and the validation sweep never raise on bad data;
//! they record into the ledger instead, so one save attempt can report
//! every invalid field at once. A key with a recorded error is treated
//! as unreadable by the record engine until the entry is cleared.

use indexmap::IndexMap;

/// Per-record mapping from attribute key to error message.
///
/// Entries keep insertion order, so aggregate failures report fields in
/// the order they went bad. No operation on the ledger itself fails.
#[derive(Debug, Default)]
pub struct ErrorLedger {
    errors: IndexMap<String, String>,
}

impl ErrorLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            errors: IndexMap::new(),
        }
    }

    /// Record an error for a key, overwriting any prior message.
    pub fn record(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        let message = message.into();
        tracing::debug!(attribute = %key, %message, "recorded attribute error");
        self.errors.insert(key, message);
    }

    /// Clear the error for a key, if any.
    pub fn clear(&mut self, key: &str) {
        self.errors.shift_remove(key);
    }

    /// Check whether a key has a recorded error.
    pub fn has(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    /// The recorded message for a key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Check whether any key has a recorded error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of keys currently in error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All recorded errors, in insertion order.
    pub fn all(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Iterate over recorded errors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

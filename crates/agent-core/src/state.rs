//! Conversation Memory
//!
//! Key-value memory scoped to a single conversation. Every [`Session`](crate::Session)
//! owns exactly one `ProfileStore`; conversations never share one.
//!
//! Reads never fail: a missing key yields the [`UNKNOWN`] sentinel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// Sentinel returned by [`ProfileStore::read`] for keys that were never saved
pub const UNKNOWN: &str = "Unknown";

/// Key under which the user's risk profile is stored
pub const RISK_PROFILE_KEY: &str = "risk_profile";

/// Per-conversation key-value store
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStore {
    values: BTreeMap<String, String>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// Returns the value that was replaced, if any. Saving the same value
    /// twice leaves the store unchanged.
    pub fn save(&mut self, key: &str, value: &str) -> Result<Option<String>> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AgentError::MissingValue("key".into()));
        }
        if value.trim().is_empty() {
            return Err(AgentError::MissingValue(key.into()));
        }

        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Some(old) = previous.as_deref().filter(|old| *old != value) {
            tracing::debug!(key, from = old, to = value, "Overwrote conversation memory");
        }
        Ok(previous)
    }

    /// Read the value for `key`, or [`UNKNOWN`] when nothing was saved
    pub fn read(&self, key: &str) -> &str {
        self.values.get(key.trim()).map_or(UNKNOWN, String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key.trim())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key_is_unknown() {
        let store = ProfileStore::new();
        assert_eq!(store.read(RISK_PROFILE_KEY), UNKNOWN);
    }

    #[test]
    fn test_save_then_read_round_trip() {
        let mut store = ProfileStore::new();
        store.save(RISK_PROFILE_KEY, "Conservative").unwrap();
        assert_eq!(store.read(RISK_PROFILE_KEY), "Conservative");

        // Same value again: idempotent
        let previous = store.save(RISK_PROFILE_KEY, "Conservative").unwrap();
        assert_eq!(previous.as_deref(), Some("Conservative"));
        assert_eq!(store.read(RISK_PROFILE_KEY), "Conservative");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_overwrites_without_confirmation() {
        let mut store = ProfileStore::new();
        store.save(RISK_PROFILE_KEY, "Conservative").unwrap();
        store.save(RISK_PROFILE_KEY, "Aggressive").unwrap();
        assert_eq!(store.read(RISK_PROFILE_KEY), "Aggressive");
    }

    #[test]
    fn test_save_rejects_blank_value() {
        let mut store = ProfileStore::new();
        let err = store.save(RISK_PROFILE_KEY, "   ").unwrap_err();
        assert!(matches!(err, AgentError::MissingValue(ref key) if key == RISK_PROFILE_KEY));
        assert!(store.is_empty());
    }
}

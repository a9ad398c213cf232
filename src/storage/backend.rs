//! Preference storage abstraction.
//!
//! A [`PreferenceStore`] is a small string key-value store that survives
//! restarts. The only key the application writes today is
//! [`THEME_KEY`](super::THEME_KEY).

use crate::domain::error::Result;
use std::collections::BTreeMap;

pub trait PreferenceStore: Send {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, persisting it before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Non-persistent store used when no preferences file is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//! JSON file-based preference storage.
//!
//! The file holds one flat JSON object of string values, e.g.
//! `{"tema": "escuro"}`. Writes go to a temporary file that is renamed over
//! the original, so a crash never leaves a half-written file.

use crate::domain::error::{Result, ScoutError};
use crate::storage::backend::PreferenceStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Preferences persisted as a JSON object.
///
/// Every [`set`](PreferenceStore::set) saves immediately; a failed save marks
/// the store dirty and is retried on drop.
pub struct JsonPreferences {
    file_path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonPreferences {
    /// Opens (or prepares to create) the preferences file at `file_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the
    /// existing file cannot be read or is not a JSON object of strings.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening preferences");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let values = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no preferences file yet");
            BTreeMap::new()
        };

        tracing::debug!(keys = values.len(), "preferences loaded");
        Ok(Self {
            file_path,
            values,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<String, String>> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| ScoutError::Storage(format!("failed to parse JSON: {e}")))
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| ScoutError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_preference", key, value).entered();

        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
        self.save_to_file()
    }
}

impl Drop for JsonPreferences {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty preferences on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

//! Storage layer for persistent user preferences.
//!
//! # Modules
//!
//! - `backend`: [`PreferenceStore`] trait and the in-memory implementation
//! - `json`: JSON file-based implementation

pub mod backend;
pub mod json;

pub use backend::{MemoryPreferences, PreferenceStore};
pub use json::JsonPreferences;

/// Key under which the theme mode is stored.
pub const THEME_KEY: &str = "tema";

/// File name of the preferences file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

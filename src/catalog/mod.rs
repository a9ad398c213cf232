//! Journal catalog.
//!
//! Loads the searchable journals from the backend (or the embedded fallback
//! list) and exposes them grouped by specialty.

pub mod directory;

pub use directory::{JournalDirectory, FALLBACK_NOTICE};

//! Journal domain model.
//!
//! A [`Journal`] is one searchable scientific journal. Journals are loaded once
//! at startup by the [`catalog`](crate::catalog) module and are read-only
//! afterwards. Field names on the wire follow the backend's Portuguese JSON
//! keys.

use serde::{Deserialize, Serialize};

/// Selection value meaning "search every journal".
///
/// When the form's journal selection contains this value (or starts with it)
/// the query carries an empty `journal_ids` list.
pub const ALL_JOURNALS: &str = "todas";

/// Display label for the [`ALL_JOURNALS`] entry.
pub const ALL_JOURNALS_LABEL: &str = "-- Todas as Revistas --";

/// A searchable scientific journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Unique identifier, also embedded in simulated DOIs.
    pub id: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// International Standard Serial Number.
    #[serde(default)]
    pub issn: String,
    /// Grouping key for the directory listing.
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Journal home page.
    #[serde(default)]
    pub url: String,
    /// Short description.
    #[serde(rename = "descricao", default)]
    pub description: String,
}

/// Journals sharing one specialty, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalGroup {
    /// The specialty name shared by every member.
    pub specialty: String,
    /// Members sorted by name.
    pub journals: Vec<Journal>,
}

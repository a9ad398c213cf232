//! Journal directory loading and grouping.

use crate::api::ApiClient;
use crate::domain::text::locale_cmp;
use crate::domain::{Journal, JournalGroup, ScoutError};
use serde::Deserialize;

const FALLBACK_TOML: &str = include_str!("../../data/journals.toml");

/// Warning shown when the backend list could not be loaded.
pub const FALLBACK_NOTICE: &str =
    "Não foi possível carregar a lista de revistas do servidor. Usando lista padrão.";

#[derive(Debug, Deserialize)]
struct FallbackFile {
    revistas: Vec<Journal>,
}

/// The searchable journals, grouped by specialty.
///
/// Built once at startup and read-only afterwards. Groups are ordered by
/// specialty and members by name, both with [`locale_cmp`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalDirectory {
    groups: Vec<JournalGroup>,
    fallback: bool,
}

impl JournalDirectory {
    /// Groups an arbitrary journal list.
    ///
    /// The specialty key is matched exactly (case-sensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use journal_scout::catalog::JournalDirectory;
    /// use journal_scout::domain::Journal;
    ///
    /// let journal = |id: &str, name: &str, specialty: &str| Journal {
    ///     id: id.into(),
    ///     name: name.into(),
    ///     issn: String::new(),
    ///     specialty: specialty.into(),
    ///     url: String::new(),
    ///     description: String::new(),
    /// };
    ///
    /// let directory = JournalDirectory::from_journals(vec![
    ///     journal("b", "Radiology", "Radiologia"),
    ///     journal("a", "AJR", "Radiologia"),
    ///     journal("c", "JBJS", "Ortopedia"),
    /// ]);
    ///
    /// let specialties: Vec<_> = directory.groups().iter().map(|g| g.specialty.as_str()).collect();
    /// assert_eq!(specialties, ["Ortopedia", "Radiologia"]);
    /// assert_eq!(directory.groups()[1].journals[0].id, "a");
    /// ```
    #[must_use]
    pub fn from_journals(journals: Vec<Journal>) -> Self {
        let mut groups: Vec<JournalGroup> = Vec::new();

        for journal in journals {
            match groups.iter_mut().find(|g| g.specialty == journal.specialty) {
                Some(group) => group.journals.push(journal),
                None => groups.push(JournalGroup {
                    specialty: journal.specialty.clone(),
                    journals: vec![journal],
                }),
            }
        }

        for group in &mut groups {
            group.journals.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        }
        groups.sort_by(|a, b| locale_cmp(&a.specialty, &b.specialty));

        Self {
            groups,
            fallback: false,
        }
    }

    /// The embedded five-journal directory used when the backend is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] if the embedded list fails to parse.
    pub fn fallback() -> Result<Self, ScoutError> {
        let file: FallbackFile = toml::from_str(FALLBACK_TOML)
            .map_err(|e| ScoutError::Config(format!("embedded journal list: {e}")))?;
        let mut directory = Self::from_journals(file.revistas);
        directory.fallback = true;
        Ok(directory)
    }

    /// Loads the directory from the backend, falling back to the embedded list.
    ///
    /// Returns the directory plus a warning message when the fallback was used.
    /// An empty but successful response yields an empty directory.
    ///
    /// # Errors
    ///
    /// Only if the embedded fallback itself is broken.
    pub async fn load(client: &ApiClient) -> Result<(Self, Option<String>), ScoutError> {
        match client.fetch_journals().await {
            Ok(journals) => {
                tracing::info!(count = journals.len(), "journal directory loaded from backend");
                Ok((Self::from_journals(journals), None))
            }
            Err(e) => {
                tracing::warn!(error = %e, "journal list unavailable, using fallback");
                Ok((Self::fallback()?, Some(FALLBACK_NOTICE.to_string())))
            }
        }
    }

    /// Specialty groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[JournalGroup] {
        &self.groups
    }

    /// Every journal, flattened in grouped display order.
    pub fn journals(&self) -> impl Iterator<Item = &Journal> {
        self.groups.iter().flat_map(|g| g.journals.iter())
    }

    /// Looks up a journal by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Journal> {
        self.journals().find(|j| j.id == id)
    }

    /// First journal in display order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Journal> {
        self.journals().next()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.journals.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.journals.is_empty())
    }

    /// Returns `true` when built from the embedded list.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

//! Result set store.
//!
//! [`ResultSetStore`] owns the single current result set together with the
//! query that produced it. Sorting reorders the stored records; filtering only
//! narrows what [`ResultSetStore::view`] returns.

use crate::domain::text::collation_key;
use crate::domain::{ResultRecord, SearchQuery};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Title,
    Authors,
    JournalName,
    PublicationDate,
    Doi,
    Source,
}

impl SortColumn {
    /// Columns in table order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Authors,
        Self::JournalName,
        Self::PublicationDate,
        Self::Doi,
        Self::Source,
    ];

    /// Header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Título",
            Self::Authors => "Autores",
            Self::JournalName => "Revista",
            Self::PublicationDate => "Data",
            Self::Doi => "DOI",
            Self::Source => "Fonte",
        }
    }

    /// Short name accepted by `sort <key>`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "titulo",
            Self::Authors => "autores",
            Self::JournalName => "revista",
            Self::PublicationDate => "data",
            Self::Doi => "doi",
            Self::Source => "fonte",
        }
    }

    fn compare(self, a: &ResultRecord, b: &ResultRecord) -> Ordering {
        let text = |x: &str, y: &str| collation_key(x).cmp(&collation_key(y));
        match self {
            Self::Title => text(&a.title, &b.title),
            Self::Authors => text(&a.authors, &b.authors),
            Self::JournalName => text(&a.journal_name, &b.journal_name),
            Self::PublicationDate => a.publication_date.cmp(&b.publication_date),
            Self::Doi => text(&a.doi, &b.doi),
            Self::Source => text(a.source.as_str(), b.source.as_str()),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    /// Accepts the column key, the header label, or its 1-based position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = collation_key(s.trim());
        if let Ok(position) = wanted.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| format!("coluna inexistente: {position}"));
        }

        Self::ALL
            .into_iter()
            .find(|c| c.key() == wanted || collation_key(c.label()) == wanted)
            .ok_or_else(|| format!("coluna desconhecida: {s}"))
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header indicator glyph.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// The column and direction of the last sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Owner of the current result set.
#[derive(Debug, Clone, Default)]
pub struct ResultSetStore {
    records: Vec<ResultRecord>,
    query: Option<SearchQuery>,
    sort: Option<SortState>,
    filter: String,
}

impl ResultSetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole result set and its provenance query.
    ///
    /// Sort state and filter text are reset.
    pub fn set_results(&mut self, records: Vec<ResultRecord>, query: SearchQuery) {
        let _span = tracing::debug_span!("set_results", count = records.len()).entered();
        self.records = records;
        self.query = Some(query);
        self.sort = None;
        self.filter.clear();
    }

    /// Drops the result set, keeping nothing.
    pub fn clear(&mut self) {
        self.records.clear();
        self.query = None;
        self.sort = None;
        self.filter.clear();
    }

    /// Sorts the stored records by `column`.
    ///
    /// Sorting the same column again flips the direction; a different column
    /// starts ascending. The sort is stable in both directions: records that
    /// compare equal keep their previous relative order.
    ///
    /// # Returns
    ///
    /// The new sort state.
    pub fn sort_by(&mut self, column: SortColumn) -> SortState {
        let direction = match self.sort {
            Some(state) if state.column == column => state.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        let _span = tracing::debug_span!("sort_by", ?column, ?direction).entered();

        match direction {
            SortDirection::Ascending => self.records.sort_by(|a, b| column.compare(a, b)),
            SortDirection::Descending => self.records.sort_by(|a, b| column.compare(b, a)),
        }

        let state = SortState { column, direction };
        self.sort = Some(state);
        state
    }

    /// Sets the filter text used by [`view`](Self::view).
    ///
    /// The stored order is untouched.
    pub fn filter(&mut self, text: &str) {
        self.filter = text.trim().to_string();
    }

    /// Records visible under the current filter, in stored order.
    ///
    /// Every whitespace-separated term must occur (case-insensitively) in the
    /// concatenation of title, authors, journal name and DOI.
    #[must_use]
    pub fn view(&self) -> Vec<&ResultRecord> {
        let terms: Vec<String> = self
            .filter
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect();

        if terms.is_empty() {
            return self.records.iter().collect();
        }

        self.records
            .iter()
            .filter(|record| {
                let haystack = format!(
                    "{} {} {} {}",
                    record.title, record.authors, record.journal_name, record.doi
                )
                .to_lowercase();
                terms.iter().all(|term| haystack.contains(term.as_str()))
            })
            .collect()
    }

    /// All stored records, ignoring the filter.
    #[must_use]
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Query that produced the current records.
    #[must_use]
    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

//! Article result record domain model.
//!
//! A [`ResultRecord`] is one article returned by a search. Records are produced
//! by the search executor and never mutated; re-sorting or filtering produces a
//! new ordering of shared records, not edited copies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bibliographic source a record was retrieved from.
///
/// The five named sources are the ones the backend aggregates and the ones the
/// simulated generator draws from. Any other name the backend sends is kept
/// verbatim in [`Source::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    PubMed,
    Crossref,
    SemanticScholar,
    OpenAlex,
    Unpaywall,
    Other(String),
}

impl Source {
    /// The sources the simulated generator picks from, uniformly.
    pub const KNOWN: [Self; 5] = [
        Self::PubMed,
        Self::Crossref,
        Self::SemanticScholar,
        Self::OpenAlex,
        Self::Unpaywall,
    ];

    /// Display name, identical to the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PubMed => "PubMed",
            Self::Crossref => "Crossref",
            Self::SemanticScholar => "Semantic Scholar",
            Self::OpenAlex => "OpenAlex",
            Self::Unpaywall => "Unpaywall",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Source {
    /// Known names match case-insensitively, with `_` standing for a space
    /// (`pubmed`, `semantic_scholar`).
    fn from(value: String) -> Self {
        let key = value.trim().to_lowercase().replace('_', " ");
        match key.as_str() {
            "pubmed" => Self::PubMed,
            "crossref" => Self::Crossref,
            "semantic scholar" => Self::SemanticScholar,
            "openalex" => Self::OpenAlex,
            "unpaywall" => Self::Unpaywall,
            _ => Self::Other(value),
        }
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        match value {
            Source::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One article in a result set.
///
/// Serializes with the backend field names
/// `id, titulo, autores, revista, data_publicacao, doi, url, fonte`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Unique within one result set.
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Display list of authors joined with `"; "`.
    #[serde(rename = "autores")]
    pub authors: String,
    #[serde(rename = "revista")]
    pub journal_name: String,
    /// ISO calendar date; only the display is localized.
    #[serde(rename = "data_publicacao")]
    pub publication_date: NaiveDate,
    pub doi: String,
    pub url: String,
    #[serde(rename = "fonte")]
    pub source: Source,
}

impl ResultRecord {
    /// Publication date formatted for display.
    #[must_use]
    pub fn display_date(&self) -> String {
        display_date(self.publication_date)
    }

    /// Resolver link for the record's DOI.
    #[must_use]
    pub fn doi_url(&self) -> String {
        format!("https://doi.org/{}", self.doi)
    }
}

/// Formats a calendar date as `dd/mm/yyyy`, the Brazilian display convention.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use journal_scout::domain::display_date;
///
/// let date = NaiveDate::from_ymd_opt(2023, 3, 7).unwrap();
/// assert_eq!(display_date(date), "07/03/2023");
/// ```
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

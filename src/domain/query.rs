//! Search query domain model.
//!
//! A [`SearchQuery`] is the normalized, validated form of the user's search
//! criteria. It is created by [`build_query`](crate::app::form::build_query)
//! once per submission, never mutated, and retained by the result set store as
//! provenance for export metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result limit used when none (or an invalid one) is given.
pub const DEFAULT_LIMIT: u32 = 30;

/// Normalized search criteria.
///
/// Serializes with the field names of the backend `POST /api/buscar` body:
/// `palavras, autor, periodo_inicio, periodo_fim, revistas, limite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text keywords, trimmed and guaranteed non-empty.
    #[serde(rename = "palavras")]
    pub keywords: String,

    /// Author filter; `None` when the field was left blank.
    #[serde(rename = "autor", default, with = "blank_as_none")]
    pub author: Option<String>,

    /// First day of the publication period (inclusive).
    #[serde(rename = "periodo_inicio")]
    pub period_start: NaiveDate,

    /// Last day of the publication period (inclusive).
    #[serde(rename = "periodo_fim")]
    pub period_end: NaiveDate,

    /// Selected journal ids; empty means every journal.
    #[serde(rename = "revistas", default)]
    pub journal_ids: Vec<String>,

    /// Maximum number of records wanted, at least 1.
    #[serde(rename = "limite")]
    pub limit: u32,
}

impl SearchQuery {
    /// Splits the keywords into lowercase whitespace-separated tokens.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use journal_scout::domain::SearchQuery;
    ///
    /// let query = SearchQuery {
    ///     keywords: "Lesão  Joelho".to_string(),
    ///     author: None,
    ///     period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
    ///     period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    ///     journal_ids: vec![],
    ///     limit: 5,
    /// };
    /// assert_eq!(query.keyword_tokens(), vec!["lesão", "joelho"]);
    /// ```
    #[must_use]
    pub fn keyword_tokens(&self) -> Vec<String> {
        self.keywords
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect()
    }

    /// Returns `true` when the query is restricted to specific journals.
    #[must_use]
    pub fn has_journal_filter(&self) -> bool {
        !self.journal_ids.is_empty()
    }
}

/// Serde adapter mapping a blank author string to `None` and back.
///
/// The backend sends and expects `""` for "no author".
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SearchQuery {
        SearchQuery {
            keywords: "joelho".to_string(),
            author: None,
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            journal_ids: vec![],
            limit: 5,
        }
    }

    #[test]
    fn serializes_backend_body() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["palavras"], "joelho");
        assert_eq!(value["autor"], "");
        assert_eq!(value["periodo_inicio"], "2023-01-01");
        assert_eq!(value["periodo_fim"], "2023-12-31");
        assert_eq!(value["revistas"], serde_json::json!([]));
        assert_eq!(value["limite"], 5);
    }

    #[test]
    fn blank_author_reads_back_as_none() {
        let json = r#"{"palavras":"x","autor":"  ","periodo_inicio":"2024-01-01",
                       "periodo_fim":"2024-02-01","revistas":["ajr"],"limite":10}"#;
        let query: SearchQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.author, None);
        assert!(query.has_journal_filter());
    }
}

//! Search form model.
//!
//! [`FormInputs`] mirrors the raw, editable form fields. [`build_query`]
//! validates them into an immutable [`SearchQuery`]; nothing else in the crate
//! constructs queries from user input.

use crate::domain::{SearchQuery, ValidationError, ALL_JOURNALS, DEFAULT_LIMIT};
use chrono::{Months, NaiveDate};
use std::str::FromStr;

/// Limit choices offered by the form, besides a custom value.
pub const LIMIT_PRESETS: [u32; 4] = [10, 30, 50, 100];

/// The result-limit field: a preset or free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitChoice {
    Preset(u32),
    /// Raw text typed by the user; parsed by [`build_query`].
    Custom(String),
}

impl LimitChoice {
    /// Resolves to the effective limit.
    ///
    /// Custom text that does not parse as a positive integer falls back to
    /// [`DEFAULT_LIMIT`]; so does a zero preset.
    #[must_use]
    pub fn resolve(&self) -> u32 {
        let value = match self {
            Self::Preset(n) => Some(*n),
            Self::Custom(text) => text.trim().parse::<u32>().ok(),
        };
        value.filter(|n| *n > 0).unwrap_or(DEFAULT_LIMIT)
    }
}

/// Quick period selections relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodPreset {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    /// Both dates stay under user control.
    Custom,
}

impl PeriodPreset {
    /// Span of the preset in calendar months; `None` for [`Self::Custom`].
    #[must_use]
    pub const fn months(self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::TwoYears => Some(24),
            Self::Custom => None,
        }
    }
}

impl FromStr for PeriodPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" => Ok(Self::OneMonth),
            "3m" => Ok(Self::ThreeMonths),
            "6m" => Ok(Self::SixMonths),
            "1y" | "1a" => Ok(Self::OneYear),
            "2y" | "2a" => Ok(Self::TwoYears),
            "custom" | "personalizado" => Ok(Self::Custom),
            other => Err(format!("período desconhecido: {other}")),
        }
    }
}

/// Returns `(start, end)` for a preset, ending on `today`.
///
/// Month arithmetic clamps to the last day of the target month, so
/// 31 March minus one month is 28 (or 29) February.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use journal_scout::app::form::{period_for, PeriodPreset};
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// let (start, end) = period_for(PeriodPreset::OneMonth, today).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(end, today);
/// ```
#[must_use]
pub fn period_for(preset: PeriodPreset, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let months = preset.months()?;
    let start = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    Some((start, today))
}

/// Raw contents of the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInputs {
    pub keywords: String,
    pub author: String,
    /// `YYYY-MM-DD`.
    pub period_start: String,
    /// `YYYY-MM-DD`.
    pub period_end: String,
    pub limit: LimitChoice,
    /// Selected journal ids, possibly including [`ALL_JOURNALS`].
    pub journals: Vec<String>,
}

impl FormInputs {
    /// Default form: the last year up to `today`, 30 results, every journal.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let mut inputs = Self {
            keywords: String::new(),
            author: String::new(),
            period_start: String::new(),
            period_end: String::new(),
            limit: LimitChoice::Preset(DEFAULT_LIMIT),
            journals: vec![ALL_JOURNALS.to_string()],
        };
        inputs.apply_preset(PeriodPreset::OneYear, today);
        inputs
    }

    /// Default form pre-filled from a URL query string's `q` parameter.
    ///
    /// Accepts the string with or without the leading `?`. `+` and
    /// percent-escapes in the value are decoded.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use journal_scout::app::form::FormInputs;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let inputs = FormInputs::from_query_string("?lang=pt&q=les%C3%A3o+joelho", today);
    /// assert_eq!(inputs.keywords, "lesão joelho");
    /// ```
    #[must_use]
    pub fn from_query_string(query: &str, today: NaiveDate) -> Self {
        let mut inputs = Self::new(today);
        if let Some(q) = query_param(query, "q") {
            inputs.keywords = q;
        }
        inputs
    }

    /// Sets both period fields from `preset`; [`PeriodPreset::Custom`] is a no-op.
    pub fn apply_preset(&mut self, preset: PeriodPreset, today: NaiveDate) {
        if let Some((start, end)) = period_for(preset, today) {
            self.period_start = start.to_string();
            self.period_end = end.to_string();
        }
    }
}

/// Validates form inputs into a query.
///
/// # Errors
///
/// - [`ValidationError::EmptyKeywords`] when keywords are blank
/// - [`ValidationError::InvalidDate`] when a period field is not `YYYY-MM-DD`
/// - [`ValidationError::InvertedPeriod`] when the start is after the end
pub fn build_query(inputs: &FormInputs) -> Result<SearchQuery, ValidationError> {
    let keywords = inputs.keywords.trim();
    if keywords.is_empty() {
        return Err(ValidationError::EmptyKeywords);
    }

    let period_start = parse_date(&inputs.period_start, "periodo_inicio")?;
    let period_end = parse_date(&inputs.period_end, "periodo_fim")?;
    if period_start > period_end {
        return Err(ValidationError::InvertedPeriod);
    }

    let author = inputs.author.trim();

    Ok(SearchQuery {
        keywords: keywords.to_string(),
        author: (!author.is_empty()).then(|| author.to_string()),
        period_start,
        period_end,
        journal_ids: selected_journals(&inputs.journals),
        limit: inputs.limit.resolve(),
    })
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(field.to_string()))
}

fn selected_journals(selection: &[String]) -> Vec<String> {
    if selection.iter().any(|id| id == ALL_JOURNALS) {
        return Vec::new();
    }

    let mut ids: Vec<String> = Vec::with_capacity(selection.len());
    for id in selection.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| {
            let spaced = v.replace('+', " ");
            String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inputs(keywords: &str) -> FormInputs {
        let mut form = FormInputs::new(date(2024, 6, 15));
        form.keywords = keywords.to_string();
        form
    }

    #[test]
    fn blank_keywords_are_rejected() {
        assert_eq!(build_query(&inputs("   ")), Err(ValidationError::EmptyKeywords));
        assert_eq!(build_query(&inputs("")), Err(ValidationError::EmptyKeywords));
    }

    #[test]
    fn defaults_cover_last_year_and_all_journals() {
        let query = build_query(&inputs("  joelho ")).unwrap();
        assert_eq!(query.keywords, "joelho");
        assert_eq!(query.period_start, date(2023, 6, 15));
        assert_eq!(query.period_end, date(2024, 6, 15));
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert!(query.journal_ids.is_empty());
        assert_eq!(query.author, None);
    }

    #[test]
    fn custom_limit_falls_back_to_default() {
        let mut form = inputs("x");
        for text in ["abc", "0", "-5", ""] {
            form.limit = LimitChoice::Custom(text.to_string());
            assert_eq!(build_query(&form).unwrap().limit, DEFAULT_LIMIT, "{text:?}");
        }
        form.limit = LimitChoice::Custom(" 75 ".to_string());
        assert_eq!(build_query(&form).unwrap().limit, 75);
    }

    #[test]
    fn sentinel_anywhere_means_all_journals() {
        let mut form = inputs("x");
        form.journals = vec!["ajr".into(), ALL_JOURNALS.into()];
        assert!(build_query(&form).unwrap().journal_ids.is_empty());

        form.journals = vec!["ajr".into(), "jbjs".into(), "ajr".into()];
        assert_eq!(build_query(&form).unwrap().journal_ids, ["ajr", "jbjs"]);
    }

    #[test]
    fn author_is_trimmed() {
        let mut form = inputs("x");
        form.author = "  Silva, A.J. ".to_string();
        assert_eq!(build_query(&form).unwrap().author.as_deref(), Some("Silva, A.J."));
    }

    #[test]
    fn bad_dates_are_rejected() {
        let mut form = inputs("x");
        form.period_start = "2024-13-01".to_string();
        assert_eq!(
            build_query(&form),
            Err(ValidationError::InvalidDate("periodo_inicio".to_string()))
        );

        let mut form = inputs("x");
        form.period_start = "2024-06-16".to_string();
        assert_eq!(build_query(&form), Err(ValidationError::InvertedPeriod));
    }

    #[test]
    fn presets_subtract_calendar_months() {
        let today = date(2024, 8, 31);
        assert_eq!(period_for(PeriodPreset::SixMonths, today), Some((date(2024, 2, 29), today)));
        assert_eq!(period_for(PeriodPreset::TwoYears, today), Some((date(2022, 8, 31), today)));
        assert_eq!(period_for(PeriodPreset::Custom, today), None);
    }

    #[test]
    fn custom_preset_keeps_user_dates() {
        let mut form = inputs("x");
        form.period_start = "2020-01-01".to_string();
        form.apply_preset(PeriodPreset::Custom, date(2024, 6, 15));
        assert_eq!(form.period_start, "2020-01-01");

        form.apply_preset(PeriodPreset::ThreeMonths, date(2024, 6, 15));
        assert_eq!(form.period_start, "2024-03-15");
    }

    #[test]
    fn query_string_without_q_leaves_keywords_empty() {
        let form = FormInputs::from_query_string("lang=pt", date(2024, 1, 1));
        assert!(form.keywords.is_empty());
    }

    #[test]
    fn query_string_value_is_url_decoded() {
        let today = date(2024, 1, 1);
        let cases = [
            ("?q=les%C3%A3o+joelho", "lesão joelho"),
            ("q=a%2Bb&lang=pt", "a+b"),
            ("q=100%", "100%"),
            ("lang=pt&q=fratura%20de%20f%C3%AAmur", "fratura de fêmur"),
        ];
        for (query, expected) in cases {
            assert_eq!(FormInputs::from_query_string(query, today).keywords, expected, "{query}");
        }
    }
}

//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place application state changes. It applies
//! an [`Event`] to [`AppState`] and returns whether the screen needs a redraw
//! together with the [`Action`]s the runtime must perform.
//!
//! # Event Types
//!
//! - **Form**: `SubmitSearch`
//! - **Results**: `SortBy`, `Filter`, `ClearResults`
//! - **Export**: `ExportRequested`, `ExportCompleted`, `ExportFailed`
//! - **Theme**: `ToggleTheme`, `SetTheme`
//! - **Runtime**: `SearchCompleted`, `JournalsLoaded`, `Notify`
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use journal_scout::app::form::FormInputs;
//! use journal_scout::app::{handle_event, Action, AppState, Event};
//! use journal_scout::catalog::JournalDirectory;
//! use journal_scout::ui::theme::{ThemeMode, ThemeSet};
//!
//! let mut state = AppState::new(JournalDirectory::fallback()?, ThemeSet::load(None)?, ThemeMode::Dark);
//! let mut form = FormInputs::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! form.keywords = "joelho".into();
//!
//! let (redraw, actions) = handle_event(&mut state, Event::SubmitSearch(form))?;
//! assert!(redraw && state.loading);
//! assert!(matches!(actions[0], Action::ExecuteSearch { seq: 1, .. }));
//! # Ok::<(), journal_scout::domain::ScoutError>(())
//! ```

use super::form::{build_query, FormInputs};
use super::results::SortColumn;
use crate::app::{Action, AppState};
use crate::catalog::JournalDirectory;
use crate::domain::error::Result;
use crate::domain::{ExportError, Notice, SearchError, SearchQuery};
use crate::export::{ExportFormat, ExportSnapshot};
use crate::search::SearchOutcome;
use crate::ui::theme::ThemeMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user submitted the search form.
    SubmitSearch(FormInputs),

    /// A background search finished.
    SearchCompleted {
        seq: u64,
        query: SearchQuery,
        result: std::result::Result<SearchOutcome, SearchError>,
    },

    SortBy(SortColumn),
    Filter(String),
    ClearResults,

    ExportRequested(ExportFormat),
    ExportCompleted(Notice),
    ExportFailed {
        format: ExportFormat,
        message: String,
    },

    ToggleTheme,
    SetTheme(ThemeMode),

    JournalsLoaded {
        directory: JournalDirectory,
        notice: Option<Notice>,
    },

    /// Feedback produced outside the handler (e.g. a failed preference save).
    Notify(Notice),
}

/// Applies `event` to `state`.
///
/// # Returns
///
/// `(redraw, actions)`: whether the screen changed, and the side effects to run.
///
/// # Errors
///
/// Operation failures are turned into notices, so this currently never
/// returns `Err`; the `Result` leaves room for state invariants that cannot
/// be recovered from.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(&event)).entered();

    match event {
        Event::SubmitSearch(inputs) => {
            let query = match build_query(&inputs) {
                Ok(query) => query,
                Err(e) => {
                    tracing::debug!(error = %e, "form rejected");
                    state.push_notice(Notice::error(e.to_string()));
                    return Ok((true, vec![]));
                }
            };

            let seq = state.next_seq();
            tracing::debug!(seq, keywords = %query.keywords, "search submitted");
            state.store.clear();
            state.loading = true;
            Ok((true, vec![Action::ExecuteSearch { seq, query }]))
        }

        Event::SearchCompleted { seq, query, result } => {
            if !state.is_latest(seq) {
                tracing::debug!(seq, latest = state.latest_seq, "discarding stale search result");
                return Ok((false, vec![]));
            }

            state.loading = false;
            match result {
                Ok(outcome) => {
                    tracing::debug!(seq, count = outcome.records.len(), simulated = outcome.simulated, "search applied");
                    state.store.set_results(outcome.records, query);
                    if let Some(notice) = outcome.notice {
                        state.push_notice(notice);
                    }
                }
                Err(e) => {
                    tracing::warn!(seq, error = %e, "search failed");
                    state.push_notice(Notice::error(format!(
                        "Ocorreu um erro ao realizar a busca: {e}"
                    )));
                }
            }
            Ok((true, vec![]))
        }

        Event::SortBy(column) => {
            if state.store.is_empty() {
                return Ok((false, vec![]));
            }
            state.store.sort_by(column);
            Ok((true, vec![]))
        }

        Event::Filter(text) => {
            state.store.filter(&text);
            Ok((true, vec![]))
        }

        Event::ClearResults => {
            state.store.clear();
            Ok((true, vec![]))
        }

        Event::ExportRequested(format) => {
            let records: Vec<_> = state.store.view().into_iter().cloned().collect();
            let query = match state.store.last_query() {
                Some(query) if !records.is_empty() => query.clone(),
                _ => {
                    state.push_notice(Notice::error(ExportError::NoResults.to_string()));
                    return Ok((true, vec![]));
                }
            };

            Ok((
                false,
                vec![Action::Export {
                    format,
                    snapshot: ExportSnapshot::new(query, records),
                }],
            ))
        }

        Event::ExportCompleted(notice) => {
            state.push_notice(notice);
            Ok((true, vec![]))
        }

        Event::ExportFailed { format, message } => {
            state.push_notice(Notice::error(format!(
                "Erro ao exportar em {}: {message}",
                format.name().to_uppercase()
            )));
            Ok((true, vec![]))
        }

        Event::ToggleTheme => {
            let mode = state.theme_mode.toggled();
            state.theme_mode = mode;
            Ok((true, vec![Action::PersistTheme(mode)]))
        }

        Event::SetTheme(mode) => {
            let changed = state.theme_mode != mode;
            state.theme_mode = mode;
            Ok((changed, vec![Action::PersistTheme(mode)]))
        }

        Event::JournalsLoaded { directory, notice } => {
            tracing::debug!(journals = directory.len(), fallback = directory.is_fallback(), "directory replaced");
            state.directory = directory;
            if let Some(notice) = notice {
                state.push_notice(notice);
            }
            Ok((true, vec![]))
        }

        Event::Notify(notice) => {
            state.push_notice(notice);
            Ok((true, vec![]))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::SubmitSearch(_) => "SubmitSearch",
        Event::SearchCompleted { .. } => "SearchCompleted",
        Event::SortBy(_) => "SortBy",
        Event::Filter(_) => "Filter",
        Event::ClearResults => "ClearResults",
        Event::ExportRequested(_) => "ExportRequested",
        Event::ExportCompleted(_) => "ExportCompleted",
        Event::ExportFailed { .. } => "ExportFailed",
        Event::ToggleTheme => "ToggleTheme",
        Event::SetTheme(_) => "SetTheme",
        Event::JournalsLoaded { .. } => "JournalsLoaded",
        Event::Notify(_) => "Notify",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoticeLevel, ResultRecord, Source, ValidationError};
    use crate::ui::theme::ThemeSet;
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::new(
            JournalDirectory::fallback().unwrap(),
            ThemeSet::load(None).unwrap(),
            ThemeMode::Dark,
        )
    }

    fn form(keywords: &str) -> FormInputs {
        let mut form = FormInputs::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        form.keywords = keywords.to_string();
        form
    }

    fn submit(state: &mut AppState, keywords: &str) -> (u64, SearchQuery) {
        let (_, actions) = handle_event(state, Event::SubmitSearch(form(keywords))).unwrap();
        match actions.into_iter().next() {
            Some(Action::ExecuteSearch { seq, query }) => (seq, query),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    fn outcome(ids: &[&str]) -> SearchOutcome {
        SearchOutcome {
            records: ids
                .iter()
                .map(|id| ResultRecord {
                    id: (*id).to_string(),
                    title: format!("T {id}"),
                    authors: "Souza, V.C.".to_string(),
                    journal_name: "AJR".to_string(),
                    publication_date: NaiveDate::from_ymd_opt(2023, 8, 8).unwrap(),
                    doi: format!("10.9/{id}"),
                    url: format!("https://doi.org/10.9/{id}"),
                    source: Source::Crossref,
                })
                .collect(),
            notice: None,
            simulated: true,
        }
    }

    #[test]
    fn invalid_form_produces_error_notice_and_no_action() {
        let mut state = state();
        let (redraw, actions) = handle_event(&mut state, Event::SubmitSearch(form("  "))).unwrap();
        assert!(redraw);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert_eq!(state.notices[0].message, ValidationError::EmptyKeywords.to_string());
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = state();
        let (first, first_query) = submit(&mut state, "joelho");
        let (second, second_query) = submit(&mut state, "quadril");
        assert!(second > first);

        let (redraw, _) = handle_event(
            &mut state,
            Event::SearchCompleted {
                seq: first,
                query: first_query,
                result: Ok(outcome(&["old"])),
            },
        )
        .unwrap();
        assert!(!redraw);
        assert!(state.loading);
        assert!(state.store.is_empty());

        handle_event(
            &mut state,
            Event::SearchCompleted {
                seq: second,
                query: second_query,
                result: Ok(outcome(&["new-a", "new-b"])),
            },
        )
        .unwrap();
        assert!(!state.loading);
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.store.last_query().unwrap().keywords, "quadril");
    }

    #[test]
    fn submitting_clears_previous_results() {
        let mut state = state();
        let (seq, query) = submit(&mut state, "joelho");
        handle_event(
            &mut state,
            Event::SearchCompleted { seq, query, result: Ok(outcome(&["a"])) },
        )
        .unwrap();
        assert_eq!(state.store.len(), 1);

        submit(&mut state, "coluna");
        assert!(state.store.is_empty());
        assert!(state.loading);
    }

    #[test]
    fn failed_search_reports_error() {
        let mut state = state();
        let (seq, query) = submit(&mut state, "joelho");
        handle_event(
            &mut state,
            Event::SearchCompleted { seq, query, result: Err(SearchError::EmptyDirectory) },
        )
        .unwrap();
        assert!(!state.loading);
        assert_eq!(state.notices.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn export_without_results_is_refused() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, Event::ExportRequested(ExportFormat::Csv)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.notices[0].message, ExportError::NoResults.to_string());
    }

    #[test]
    fn export_snapshots_the_filtered_view() {
        let mut state = state();
        let (seq, query) = submit(&mut state, "joelho");
        handle_event(
            &mut state,
            Event::SearchCompleted { seq, query, result: Ok(outcome(&["joelho-1", "quadril-2", "joelho-3"])) },
        )
        .unwrap();
        handle_event(&mut state, Event::SortBy(SortColumn::Title)).unwrap();
        handle_event(&mut state, Event::SortBy(SortColumn::Title)).unwrap();
        handle_event(&mut state, Event::Filter("joelho".to_string())).unwrap();

        let (_, actions) =
            handle_event(&mut state, Event::ExportRequested(ExportFormat::Txt)).unwrap();
        let Some(Action::Export { snapshot, .. }) = actions.first() else {
            panic!("expected export action");
        };
        let ids: Vec<_> = snapshot.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["joelho-3", "joelho-1"]);
        assert_eq!(snapshot.query.keywords, "joelho");
    }

    #[test]
    fn toggle_theme_persists_new_mode() {
        let mut state = state();
        let (redraw, actions) = handle_event(&mut state, Event::ToggleTheme).unwrap();
        assert!(redraw);
        assert_eq!(state.theme_mode, ThemeMode::Light);
        assert_eq!(actions, vec![Action::PersistTheme(ThemeMode::Light)]);
    }
}

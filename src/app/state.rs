//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the user sees: the journal
//! directory, the result set store, the active theme, the loading flag and the
//! recent notices. It is mutated only by
//! [`handle_event`](crate::app::handle_event) and read by the renderer through
//! [`AppState::compute_viewmodel`].
//!
//! # Request Sequencing
//!
//! Each submitted search takes the next value of a monotonic counter.
//! Completions carrying any other sequence number are stale and dropped, so
//! the displayed results always belong to the latest submission.

use super::results::{ResultSetStore, SortColumn};
use crate::catalog::JournalDirectory;
use crate::domain::Notice;
use crate::ui::theme::{Theme, ThemeMode, ThemeSet};
use crate::ui::viewmodel::{
    Cell, ColumnHeader, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, TableRow,
    UIViewModel,
};

/// Notices kept for the footer.
pub const MAX_NOTICES: usize = 5;

/// Placeholder shown when a search produced nothing visible.
pub const EMPTY_RESULTS_MESSAGE: &str =
    "Nenhum resultado encontrado. Tente modificar os termos de busca ou ampliar o período.";

/// Placeholder shown before the first search.
pub const NO_SEARCH_MESSAGE: &str = "Informe as palavras-chave e realize uma busca.";

const KEYBINDINGS: &str = "buscar <termos> • ordenar <1-6> • filtrar <texto> • exportar <formato> • tema • limpar • sair";

/// Column separator drawn between cells.
pub const COLUMN_SEPARATOR: &str = " │ ";

const DATE_WIDTH: usize = 10;
const SOURCE_WIDTH: usize = 16;
const MIN_WIDTH: usize = 6;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Journals available for selection and simulated attribution.
    pub directory: JournalDirectory,

    /// The current result set.
    pub store: ResultSetStore,

    pub themes: ThemeSet,
    pub theme_mode: ThemeMode,

    /// A search is in flight.
    pub loading: bool,

    /// Sequence number of the latest submitted search; 0 before the first.
    pub latest_seq: u64,

    /// Recent notices, oldest first, at most [`MAX_NOTICES`].
    pub notices: Vec<Notice>,
}

impl AppState {
    /// Creates the initial state.
    ///
    /// # Parameters
    ///
    /// * `directory` - Loaded journal directory
    /// * `themes` - Light and dark schemes
    /// * `theme_mode` - Persisted mode to start in
    #[must_use]
    pub fn new(directory: JournalDirectory, themes: ThemeSet, theme_mode: ThemeMode) -> Self {
        Self {
            directory,
            store: ResultSetStore::new(),
            themes,
            theme_mode,
            loading: false,
            latest_seq: 0,
            notices: Vec::new(),
        }
    }

    /// The scheme for the active mode.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        self.themes.get(self.theme_mode)
    }

    /// Takes the next search sequence number and marks it latest.
    pub fn next_seq(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Returns `true` when `seq` belongs to the latest submitted search.
    #[must_use]
    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Appends a notice, dropping the oldest beyond [`MAX_NOTICES`].
    pub fn push_notice(&mut self, notice: Notice) {
        tracing::debug!(level = ?notice.level, message = %notice.message, "notice");
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }

    /// Computes the view model for a terminal `cols` wide.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        let _span = tracing::debug_span!("compute_viewmodel", cols).entered();

        let view = self.store.view();
        let widths = column_widths(cols);
        let sort = self.store.sort_state();

        let columns = SortColumn::ALL
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (column, width))| ColumnHeader {
                label: column.label(),
                position: i + 1,
                width,
                indicator: sort
                    .filter(|s| s.column == *column)
                    .map(|s| s.direction.indicator()),
            })
            .collect();

        let rows = view
            .iter()
            .map(|r| TableRow {
                cells: vec![
                    Cell {
                        text: r.title.clone(),
                        link: Some(r.url.clone()),
                    },
                    Cell {
                        text: r.authors.clone(),
                        link: None,
                    },
                    Cell {
                        text: r.journal_name.clone(),
                        link: None,
                    },
                    Cell {
                        text: r.display_date(),
                        link: None,
                    },
                    Cell {
                        text: r.doi.clone(),
                        link: Some(r.doi_url()),
                    },
                    Cell {
                        text: r.source.to_string(),
                        link: None,
                    },
                ],
            })
            .collect();

        let empty_state = (view.is_empty() && !self.loading).then(|| EmptyState {
            message: if self.store.last_query().is_some() {
                EMPTY_RESULTS_MESSAGE.to_string()
            } else {
                NO_SEARCH_MESSAGE.to_string()
            },
        });

        let title = self.store.last_query().map_or_else(
            || "Buscador de Revistas Científicas".to_string(),
            |q| format!("Resultados da busca: {}", q.keywords),
        );

        UIViewModel {
            header: HeaderInfo {
                title,
                visible: view.len(),
                total: self.store.len(),
                loading: self.loading,
            },
            filter_bar: (!self.store.is_empty()).then(|| FilterBarInfo {
                text: self.store.filter_text().to_string(),
            }),
            columns,
            rows,
            empty_state,
            footer: FooterInfo {
                notices: self.notices.clone(),
                keybindings: KEYBINDINGS.to_string(),
            },
        }
    }
}

/// Splits `cols` among the six columns.
///
/// Date and source are fixed; the remainder goes 40% to the title and 20%
/// each to authors, journal and DOI, with a floor of six columns each.
fn column_widths(cols: usize) -> [usize; 6] {
    let separators = COLUMN_SEPARATOR.chars().count() * (SortColumn::ALL.len() - 1);
    let flexible = cols.saturating_sub(DATE_WIDTH + SOURCE_WIDTH + separators);

    let share = |percent: usize| (flexible * percent / 100).max(MIN_WIDTH);
    let authors = share(20);
    let journal = share(20);
    let doi = share(20);
    let title = flexible
        .saturating_sub(authors + journal + doi)
        .max(MIN_WIDTH);

    [title, authors, journal, DATE_WIDTH, doi, SOURCE_WIDTH]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResultRecord, SearchQuery, Source};
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::new(
            JournalDirectory::fallback().unwrap(),
            ThemeSet::load(None).unwrap(),
            ThemeMode::Dark,
        )
    }

    fn record(id: &str) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            title: format!("Título {id}"),
            authors: "Silva, A.J.".to_string(),
            journal_name: "AJR".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            doi: format!("10.1/{id}"),
            url: format!("https://doi.org/10.1/{id}"),
            source: Source::OpenAlex,
        }
    }

    fn query() -> SearchQuery {
        SearchQuery {
            keywords: "joelho".to_string(),
            author: None,
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            journal_ids: vec![],
            limit: 10,
        }
    }

    #[test]
    fn widths_fill_the_terminal() {
        let widths = column_widths(160);
        let separators = COLUMN_SEPARATOR.chars().count() * 5;
        assert_eq!(widths.iter().sum::<usize>() + separators, 160);
        assert!(widths[0] > widths[1]);

        assert!(column_widths(10).iter().all(|w| *w >= MIN_WIDTH));
    }

    #[test]
    fn notices_are_capped() {
        let mut state = state();
        for i in 0..8 {
            state.push_notice(Notice::success(format!("n{i}")));
        }
        assert_eq!(state.notices.len(), MAX_NOTICES);
        assert_eq!(state.notices[0].message, "n3");
    }

    #[test]
    fn viewmodel_reflects_sort_and_filter() {
        let mut state = state();
        state
            .store
            .set_results(vec![record("a"), record("b")], query());
        state.store.sort_by(SortColumn::Doi);
        state.store.sort_by(SortColumn::Doi);
        state.store.filter("10.1/b");

        let vm = state.compute_viewmodel(120);
        assert_eq!(vm.header.visible, 1);
        assert_eq!(vm.header.total, 2);
        assert_eq!(vm.columns[4].indicator, Some("▼"));
        assert!(vm.columns[0].indicator.is_none());
        assert_eq!(vm.rows[0].cells[3].text, "01/04/2023");
        assert_eq!(vm.rows[0].cells[4].link.as_deref(), Some("https://doi.org/10.1/b"));
        assert_eq!(vm.filter_bar.unwrap().text, "10.1/b");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn empty_view_after_search_shows_placeholder() {
        let mut state = state();
        assert_eq!(
            state.compute_viewmodel(80).empty_state.unwrap().message,
            NO_SEARCH_MESSAGE
        );

        state.store.set_results(vec![record("a")], query());
        state.store.filter("inexistente");
        assert_eq!(
            state.compute_viewmodel(80).empty_state.unwrap().message,
            EMPTY_RESULTS_MESSAGE
        );

        state.loading = true;
        assert!(state.compute_viewmodel(80).empty_state.is_none());
    }
}

//! Action execution and the session event loop.
//!
//! [`Runtime`] performs the side effects that [`handle_event`] asks for.
//! Searches are spawned onto the tokio runtime and report back through an
//! unbounded channel as [`Event::SearchCompleted`]; exports and preference
//! writes are awaited inline and turned into follow-up events directly.
//!
//! [`Session`] owns the [`AppState`] together with its runtime and is what
//! the CLI drives: it dispatches an event, runs the resulting actions, feeds
//! their follow-up events back into the handler until nothing is left, and
//! hands out background completions as they arrive.

use super::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::domain::Notice;
use crate::export::{ExportEngine, ExportFormat, ExportOutcome, ExportSnapshot};
use crate::search::SearchExecutor;
use crate::storage::PreferenceStore;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Executes [`Action`]s.
pub struct Runtime {
    executor: Arc<SearchExecutor>,
    exporter: ExportEngine,
    prefs: Box<dyn PreferenceStore>,
    export_dir: PathBuf,
    tx: mpsc::UnboundedSender<Event>,
}

impl Runtime {
    /// Creates a runtime and the receiver its background completions arrive on.
    ///
    /// # Parameters
    ///
    /// * `executor` - Search executor shared with spawned search tasks
    /// * `exporter` - Export engine
    /// * `prefs` - Preference store the theme mode is written to
    /// * `export_dir` - Directory export artifacts are written into
    #[must_use]
    pub fn new(
        executor: SearchExecutor,
        exporter: ExportEngine,
        prefs: Box<dyn PreferenceStore>,
        export_dir: PathBuf,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                executor: Arc::new(executor),
                exporter,
                prefs,
                export_dir,
                tx,
            },
            rx,
        )
    }

    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Performs `action`.
    ///
    /// Returns the follow-up event for actions that complete inline; spawned
    /// searches report through the channel instead and return `None`.
    pub async fn perform(&mut self, action: Action, state: &AppState) -> Option<Event> {
        match action {
            Action::ExecuteSearch { seq, query } => {
                let executor = Arc::clone(&self.executor);
                let directory = state.directory.clone();
                let tx = self.tx.clone();

                tokio::spawn(async move {
                    let result = executor.execute(&query, &directory).await;
                    if tx.send(Event::SearchCompleted { seq, query, result }).is_err() {
                        tracing::debug!(seq, "session closed before search completed");
                    }
                });
                None
            }

            Action::Export { format, snapshot } => Some(self.export(format, &snapshot).await),

            Action::PersistTheme(mode) => match mode.save(self.prefs.as_mut()) {
                Ok(()) => {
                    tracing::debug!(%mode, "theme persisted");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to persist theme");
                    Some(Event::Notify(Notice::warning(format!(
                        "Não foi possível salvar a preferência de tema: {e}"
                    ))))
                }
            },
        }
    }

    async fn export(&self, format: ExportFormat, snapshot: &ExportSnapshot) -> Event {
        let now = chrono::Local::now().naive_local();

        let report = match self.exporter.export(format, snapshot, now).await {
            Ok(report) => report,
            Err(e) => {
                return Event::ExportFailed {
                    format,
                    message: e.to_string(),
                }
            }
        };

        match report.outcome {
            ExportOutcome::File(artifact) => match artifact.write_to(&self.export_dir) {
                Ok(path) => Event::ExportCompleted(Notice {
                    level: report.notice.level,
                    message: format!("{} Arquivo: {}", report.notice.message, path.display()),
                }),
                Err(e) => Event::ExportFailed {
                    format,
                    message: e.to_string(),
                },
            },
            ExportOutcome::OpenUrl(url) => Event::ExportCompleted(Notice {
                level: report.notice.level,
                message: format!("{} Abra: {url}", report.notice.message),
            }),
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("executor", &self.executor)
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}

/// Application state bound to its runtime.
#[derive(Debug)]
pub struct Session {
    pub state: AppState,
    runtime: Runtime,
    completions: mpsc::UnboundedReceiver<Event>,
}

impl Session {
    #[must_use]
    pub fn new(state: AppState, runtime: Runtime, completions: mpsc::UnboundedReceiver<Event>) -> Self {
        Self {
            state,
            runtime,
            completions,
        }
    }

    #[must_use]
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Handles `event` and every event its actions produce inline.
    ///
    /// Returns `true` if any step asked for a redraw.
    ///
    /// # Errors
    ///
    /// Propagates unrecoverable handler errors.
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut redraw = false;

        while let Some(event) = queue.pop_front() {
            let (changed, actions) = handle_event(&mut self.state, event)?;
            redraw |= changed;

            for action in actions {
                if let Some(follow_up) = self.runtime.perform(action, &self.state).await {
                    queue.push_back(follow_up);
                }
            }
        }
        Ok(redraw)
    }

    /// Waits for the next background completion.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` next to user input.
    pub async fn next_completion(&mut self) -> Option<Event> {
        self.completions.recv().await
    }

    /// Dispatches background completions until no search is in flight.
    ///
    /// # Errors
    ///
    /// Propagates unrecoverable handler errors.
    pub async fn settle(&mut self) -> Result<()> {
        while self.state.loading {
            match self.completions.recv().await {
                Some(event) => {
                    self.dispatch(event).await?;
                }
                None => break,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::app::form::FormInputs;
    use crate::catalog::JournalDirectory;
    use crate::domain::NoticeLevel;
    use crate::search::SearchPolicy;
    use crate::storage::{MemoryPreferences, THEME_KEY};
    use crate::ui::theme::{ThemeMode, ThemeSet};
    use chrono::NaiveDate;
    use std::time::Duration;

    fn unreachable_client() -> ApiClient {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        ApiClient::new(format!("http://127.0.0.1:{port}/api"), Duration::from_secs(2)).unwrap()
    }

    fn session(export_dir: PathBuf) -> Session {
        let client = unreachable_client();
        let executor = SearchExecutor::new(SearchPolicy::Simulated, Duration::ZERO, Some(7));
        let exporter = ExportEngine::new(client, false);
        let (runtime, rx) = Runtime::new(
            executor,
            exporter,
            Box::new(MemoryPreferences::default()),
            export_dir,
        );
        let state = AppState::new(
            JournalDirectory::fallback().unwrap(),
            ThemeSet::load(None).unwrap(),
            ThemeMode::Dark,
        );
        Session::new(state, runtime, rx)
    }

    fn form(keywords: &str) -> FormInputs {
        let mut form = FormInputs::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        form.keywords = keywords.to_string();
        form
    }

    #[tokio::test]
    async fn search_runs_in_background_and_settles() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path().to_path_buf());

        assert!(session.dispatch(Event::SubmitSearch(form("joelho"))).await.unwrap());
        assert!(session.state.loading);

        session.settle().await.unwrap();
        assert!(!session.state.loading);
        assert_eq!(session.state.store.len(), 30);
    }

    #[tokio::test]
    async fn csv_export_writes_file_and_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path().to_path_buf());
        session.dispatch(Event::SubmitSearch(form("quadril"))).await.unwrap();
        session.settle().await.unwrap();

        session
            .dispatch(Event::ExportRequested(ExportFormat::Csv))
            .await
            .unwrap();

        let notice = session.state.notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(notice.message.contains("CSV"));

        let written: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("resultados_quadril_"));
        assert!(written[0].ends_with(".csv"));
    }

    #[tokio::test]
    async fn pdf_export_failure_becomes_error_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path().to_path_buf());
        session.dispatch(Event::SubmitSearch(form("ombro"))).await.unwrap();
        session.settle().await.unwrap();

        session
            .dispatch(Event::ExportRequested(ExportFormat::Pdf))
            .await
            .unwrap();

        let notice = session.state.notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Erro ao exportar em PDF"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn theme_toggle_is_persisted() {
        let client = unreachable_client();
        let (mut runtime, _rx) = Runtime::new(
            SearchExecutor::new(SearchPolicy::Simulated, Duration::ZERO, None),
            ExportEngine::new(client, false),
            Box::new(MemoryPreferences::default()),
            PathBuf::from("."),
        );
        let state = AppState::new(
            JournalDirectory::fallback().unwrap(),
            ThemeSet::load(None).unwrap(),
            ThemeMode::Dark,
        );

        let follow_up = runtime
            .perform(Action::PersistTheme(ThemeMode::Light), &state)
            .await;
        assert!(follow_up.is_none());
        assert_eq!(runtime.prefs.get(THEME_KEY).as_deref(), Some("claro"));
    }
}

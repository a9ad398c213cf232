//! journal-scout: search scientific journal articles from the terminal.
//!
//! journal-scout provides:
//! - A validated search form (keywords, author, period, journals, limit)
//! - Remote search against the journal backend, with simulated results as a
//!   fallback or as the only source
//! - A result table with stable multi-column sorting and live filtering
//! - Export to HTML, CSV and TXT locally, and to PDF or Excel via the backend
//! - Light and dark color schemes persisted between runs

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Form validation, result store                    │
//! │  - Event handling, action dispatching               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search/Export │   │ Storage Layer │
//! │ (ui/)         │   │ (search/,     │   │ (storage/)    │
//! │ - Rendering   │   │  export/)     │   │ - JSON prefs  │
//! │ - Theming     │   │ - Simulated   │   │ - Store trait │
//! │ - Components  │   │ - Documents   │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Backend client (api/), journal catalog (catalog/)  │
//! │  Domain types (domain/), platform paths             │
//! │  (infrastructure/)                                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing to a rotating log file                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP client and wire types for the backend
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Journal directory grouped by specialty
//! - [`domain`]: Core domain types (queries, records, notices, errors)
//! - [`export`]: Document rendering and backend export
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`observability`]: Logging setup
//! - [`search`]: Search executor and simulated result generator
//! - [`storage`]: Preference persistence
//! - [`ui`]: Terminal rendering with theme support
//!
//! # Configuration
//!
//! Settings come from an optional TOML file, overridden by `key=value`
//! pairs given on the command line:
//!
//! ```toml
//! api_url = "http://localhost:5000/api"
//! search_policy = "remote"
//! export_dir = "~/Documentos"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use journal_scout::app::form::FormInputs;
//! use journal_scout::{initialize, Config, Event};
//!
//! # async fn run() -> journal_scout::Result<()> {
//! let mut session = initialize(&Config::default()).await?;
//!
//! let mut form = FormInputs::new(chrono::Local::now().date_naive());
//! form.keywords = "joelho".to_string();
//! session.dispatch(Event::SubmitSearch(form)).await?;
//! session.settle().await?;
//!
//! println!("{}", journal_scout::ui::render(&session.state, 120));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod catalog;
pub mod domain;
pub mod export;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Session};
pub use domain::{Result, ScoutError};
pub use ui::Theme;

use api::ApiClient;
use app::Runtime;
use catalog::JournalDirectory;
use domain::Notice;
use export::ExportEngine;
use search::{SearchExecutor, SearchPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use storage::{JsonPreferences, MemoryPreferences, PreferenceStore, PREFERENCES_FILE};
use ui::{ThemeMode, ThemeSet};

/// Where search results come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPolicyKind {
    /// Generate results locally; the backend is never queried for searches.
    #[default]
    Simulated,
    /// Query the backend, degrading to simulated results on network errors.
    Remote,
}

impl FromStr for SearchPolicyKind {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "simulada" => Ok(Self::Simulated),
            "remote" | "remota" => Ok(Self::Remote),
            other => Err(ScoutError::Config(format!("unknown search policy: {other}"))),
        }
    }
}

impl fmt::Display for SearchPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simulated => "simulated",
            Self::Remote => "remote",
        })
    }
}

/// Application configuration.
///
/// # Example
///
/// ```toml
/// api_url = "http://localhost:5000/api"
/// search_policy = "remote"
/// simulated_delay_ms = 0
/// simulated_seed = 42
/// export_dir = "/tmp/exports"
/// legacy_pdf_endpoint = true
/// theme_file = "~/.config/journal-scout/theme.toml"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL, without the endpoint path.
    pub api_url: String,

    pub search_policy: SearchPolicyKind,

    /// Artificial latency for simulated searches. Default: 1000
    pub simulated_delay_ms: u64,

    /// Seed for reproducible simulated results.
    pub simulated_seed: Option<u64>,

    /// Delay before the search triggered by `--url-query` runs. Default: 1000
    pub autosearch_delay_ms: u64,

    /// Per-request timeout for backend calls. Default: 30
    pub request_timeout_secs: u64,

    /// Where export files are written. `~` is expanded. Default: `.`
    pub export_dir: String,

    /// Preferences and log file location.
    ///
    /// Default: `$XDG_DATA_HOME/journal-scout` or `~/.local/share/journal-scout`.
    pub data_dir: Option<String>,

    /// Send PDF exports to the form-encoded `/exportar/pdf` endpoint.
    pub legacy_pdf_endpoint: bool,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Log level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            search_policy: SearchPolicyKind::Simulated,
            simulated_delay_ms: 1000,
            simulated_seed: None,
            autosearch_delay_ms: 1000,
            request_timeout_secs: 30,
            export_dir: ".".to_string(),
            data_dir: None,
            legacy_pdf_endpoint: false,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads a TOML configuration file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Io`] if the file cannot be read and
    /// [`ScoutError::Config`] if it is not valid configuration.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ScoutError::Config(format!("{}: {e}", path.display())))
    }

    /// Builds a configuration from a string map over the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use journal_scout::{Config, SearchPolicyKind};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_policy".to_string(), "remote".to_string());
    /// map.insert("simulated_delay_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.search_policy, SearchPolicyKind::Remote);
    /// assert_eq!(config.simulated_delay_ms, 250);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge_map(map)
    }

    /// Overrides fields with the values present in `map`.
    ///
    /// # Parsing Rules
    ///
    /// - Numbers that fail to parse keep the current value
    /// - `legacy_pdf_endpoint`: `true`/`1`/`yes`/`sim` enable it, anything else disables it
    /// - `search_policy`: unknown values keep the current policy
    /// - Blank strings clear optional fields
    /// - Unknown keys are ignored with a warning
    #[must_use]
    pub fn merge_map(mut self, map: &BTreeMap<String, String>) -> Self {
        fn optional(value: &str) -> Option<String> {
            Some(value.trim().to_string()).filter(|v| !v.is_empty())
        }

        for (key, value) in map {
            match key.as_str() {
                "api_url" => self.api_url = value.trim().to_string(),
                "search_policy" => match value.parse() {
                    Ok(policy) => self.search_policy = policy,
                    Err(e) => tracing::warn!(error = %e, "ignoring search_policy"),
                },
                "simulated_delay_ms" => {
                    self.simulated_delay_ms = value.trim().parse().unwrap_or(self.simulated_delay_ms);
                }
                "simulated_seed" => self.simulated_seed = value.trim().parse().ok(),
                "autosearch_delay_ms" => {
                    self.autosearch_delay_ms = value.trim().parse().unwrap_or(self.autosearch_delay_ms);
                }
                "request_timeout_secs" => {
                    self.request_timeout_secs = value.trim().parse().unwrap_or(self.request_timeout_secs);
                }
                "export_dir" => {
                    self.export_dir = optional(value).unwrap_or_else(|| ".".to_string());
                }
                "data_dir" => self.data_dir = optional(value),
                "legacy_pdf_endpoint" => {
                    self.legacy_pdf_endpoint = matches!(
                        value.trim().to_ascii_lowercase().as_str(),
                        "true" | "1" | "yes" | "sim"
                    );
                }
                "theme_file" => self.theme_file = optional(value),
                "trace_level" => self.trace_level = optional(value),
                other => tracing::warn!(key = other, "unknown configuration key"),
            }
        }
        self
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::get_data_dir(self.data_dir.as_deref())
    }

    /// Resolved export directory.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        infrastructure::expand_tilde(self.export_dir.trim())
    }

    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join(PREFERENCES_FILE)
    }
}

/// Builds a ready-to-use session from configuration.
///
/// Loads the journal directory (from the backend under the remote policy,
/// the embedded list otherwise), opens the preferences file, loads the color
/// schemes and restores the persisted theme mode. Problems that do not
/// prevent the application from working are reported as notices on the
/// returned state:
///
/// - Backend journal list unavailable → embedded list
/// - Preferences file unreadable → in-memory preferences
/// - Custom theme file invalid → built-in schemes
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the embedded
/// journal list or built-in themes fail to load.
pub async fn initialize(config: &Config) -> Result<Session> {
    tracing::debug!(policy = %config.search_policy, api_url = %config.api_url, "initializing journal-scout");

    let client = ApiClient::new(
        config.api_url.as_str(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let mut notices = Vec::new();

    let (directory, policy) = match config.search_policy {
        SearchPolicyKind::Remote => {
            let (directory, warning) = JournalDirectory::load(&client).await?;
            notices.extend(warning.map(Notice::warning));
            (directory, SearchPolicy::Remote(client.clone()))
        }
        SearchPolicyKind::Simulated => (JournalDirectory::fallback()?, SearchPolicy::Simulated),
    };

    let prefs: Box<dyn PreferenceStore> = match JsonPreferences::open(config.preferences_path()) {
        Ok(prefs) => Box::new(prefs),
        Err(e) => {
            tracing::warn!(error = %e, "preferences unavailable, keeping them in memory");
            notices.push(Notice::warning(format!(
                "Preferências não serão salvas: {e}"
            )));
            Box::new(MemoryPreferences::default())
        }
    };

    let custom_theme = config
        .theme_file
        .as_deref()
        .map(infrastructure::expand_tilde);
    let themes = match ThemeSet::load(custom_theme.as_deref()) {
        Ok(themes) => themes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load theme file, using built-in themes");
            notices.push(Notice::warning(format!("Tema personalizado ignorado: {e}")));
            ThemeSet::load(None)?
        }
    };
    let theme_mode = ThemeMode::load(prefs.as_ref());

    let executor = SearchExecutor::new(
        policy,
        Duration::from_millis(config.simulated_delay_ms),
        config.simulated_seed,
    );
    let exporter = ExportEngine::new(client, config.legacy_pdf_endpoint);
    let (runtime, completions) = Runtime::new(executor, exporter, prefs, config.export_dir());

    let mut state = AppState::new(directory, themes, theme_mode);
    for notice in notices {
        state.push_notice(notice);
    }

    tracing::info!(journals = state.directory.len(), theme = %theme_mode, "journal-scout ready");
    Ok(Session::new(state, runtime, completions))
}

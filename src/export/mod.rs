//! Export of the current result set.
//!
//! HTML, CSV and TXT documents are rendered locally; PDF and Excel are
//! generated by the backend. Every export works on an [`ExportSnapshot`] taken
//! from the result set store, in current view order, and yields an
//! [`ExportReport`]: the artifact (or a URL the backend wants opened) plus a
//! notice for the user.
//!
//! # Modules
//!
//! - [`csv`]: quoted CSV table
//! - [`html`]: self-contained HTML document
//! - [`txt`]: numbered plain-text listing
//! - [`remote`]: backend-generated PDF and Excel

pub mod csv;
pub mod html;
pub mod remote;
pub mod txt;

use crate::api::ApiClient;
use crate::domain::{ExportError, Notice, ResultRecord, SearchQuery};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Footer line closing every locally rendered document.
pub const FOOTER: &str = "Exportado pelo Buscador de Revistas Científicas";

/// Maximum number of keyword characters kept in export filenames.
const FILENAME_KEYWORD_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Html,
    Csv,
    Txt,
    Pdf,
    Excel,
}

impl ExportFormat {
    pub const ALL: [Self; 5] = [Self::Html, Self::Csv, Self::Txt, Self::Pdf, Self::Excel];

    /// Name used on the wire and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Excel => "excel",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            other => other.name(),
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Csv => "text/csv;charset=utf-8",
            Self::Txt => "text/plain;charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "xlsx" | "xls" => Ok(Self::Excel),
            name => Self::ALL
                .into_iter()
                .find(|f| f.name() == name)
                .ok_or_else(|| ExportError::UnsupportedFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The records to export and the query that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    pub query: SearchQuery,
    /// In current view order.
    pub records: Vec<ResultRecord>,
}

impl ExportSnapshot {
    #[must_use]
    pub fn new(query: SearchQuery, records: Vec<ResultRecord>) -> Self {
        Self { query, records }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A finished export file, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Writes the artifact into `dir` and returns the final path.
    ///
    /// The bytes go to a temporary file first and are renamed into place, so
    /// a crash never leaves a truncated export behind.
    ///
    /// # Errors
    ///
    /// [`ExportError::Io`] if the directory cannot be created or written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let _span = tracing::debug_span!("write_artifact", filename = %self.filename).entered();

        std::fs::create_dir_all(dir)?;
        let final_path = dir.join(&self.filename);
        let tmp_path = dir.join(format!(".{}.tmp", self.filename));

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, &self.bytes)?;
        std::fs::rename(&tmp_path, &final_path)?;

        tracing::debug!(path = ?final_path, size = self.bytes.len(), "artifact written");
        Ok(final_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    File(Artifact),
    /// The backend stored the document and wants this URL opened.
    OpenUrl(String),
}

/// A completed export and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub format: ExportFormat,
    pub outcome: ExportOutcome,
    pub notice: Notice,
}

/// Builds the export filename for `query` on `date`.
///
/// Whitespace runs in the keywords become `_` (as do path separators) and
/// only the first 30 characters are kept.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use journal_scout::export::export_filename;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
/// assert_eq!(
///     export_filename("lesão   do joelho", "csv", date),
///     "resultados_lesão_do_joelho_2024-05-02.csv"
/// );
/// ```
#[must_use]
pub fn export_filename(keywords: &str, extension: &str, date: NaiveDate) -> String {
    let slug: String = keywords
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .take(FILENAME_KEYWORD_CHARS)
        .collect();

    format!("resultados_{slug}_{}.{extension}", date.format("%Y-%m-%d"))
}

/// Produces export documents from result snapshots.
#[derive(Debug, Clone)]
pub struct ExportEngine {
    client: ApiClient,
    legacy_pdf_endpoint: bool,
}

impl ExportEngine {
    /// # Parameters
    ///
    /// * `client` - Backend used for PDF and Excel
    /// * `legacy_pdf_endpoint` - Send PDF requests to the form-encoded `/exportar/pdf`
    #[must_use]
    pub fn new(client: ApiClient, legacy_pdf_endpoint: bool) -> Self {
        Self {
            client,
            legacy_pdf_endpoint,
        }
    }

    /// Exports `snapshot` as `format`, timestamped with `now`.
    ///
    /// Excel falls back to a local CSV with a warning when the backend fails;
    /// PDF has no local fallback.
    ///
    /// # Errors
    ///
    /// - [`ExportError::NoResults`] when the snapshot is empty
    /// - [`ExportError::Backend`] / [`ExportError::Network`] when a PDF export fails
    #[tracing::instrument(level = "debug", skip(self, snapshot), fields(count = snapshot.records.len()))]
    pub async fn export(
        &self,
        format: ExportFormat,
        snapshot: &ExportSnapshot,
        now: NaiveDateTime,
    ) -> Result<ExportReport, ExportError> {
        if snapshot.is_empty() {
            return Err(ExportError::NoResults);
        }

        let success = || {
            Notice::success(format!(
                "Exportação em {} realizada com sucesso!",
                format.name().to_uppercase()
            ))
        };

        if let Some(artifact) = render_local(format, snapshot, now)? {
            tracing::info!(%format, filename = %artifact.filename, "local export rendered");
            return Ok(ExportReport {
                format,
                outcome: ExportOutcome::File(artifact),
                notice: success(),
            });
        }

        match remote::export(&self.client, format, snapshot, self.legacy_pdf_endpoint).await {
            Ok(outcome) => Ok(ExportReport {
                format,
                outcome,
                notice: success(),
            }),
            Err(e) if format == ExportFormat::Excel => {
                tracing::warn!(error = %e, "excel export failed, writing CSV instead");
                let artifact = build_artifact(ExportFormat::Csv, snapshot, now, csv::render(snapshot)?);
                Ok(ExportReport {
                    format,
                    outcome: ExportOutcome::File(artifact),
                    notice: Notice::warning(format!(
                        "{e}. Exportado como CSV; o arquivo Excel é gerado pelo servidor."
                    )),
                })
            }
            Err(e) => {
                tracing::warn!(%format, error = %e, "remote export failed");
                Err(e)
            }
        }
    }
}

/// Renders the locally supported formats; `Ok(None)` for backend formats.
///
/// # Errors
///
/// [`ExportError::Csv`] if the CSV writer fails.
pub fn render_local(
    format: ExportFormat,
    snapshot: &ExportSnapshot,
    now: NaiveDateTime,
) -> Result<Option<Artifact>, ExportError> {
    let body = match format {
        ExportFormat::Html => html::render(snapshot, now).into_bytes(),
        ExportFormat::Csv => csv::render(snapshot)?,
        ExportFormat::Txt => txt::render(snapshot, now).into_bytes(),
        ExportFormat::Pdf | ExportFormat::Excel => return Ok(None),
    };

    Ok(Some(build_artifact(format, snapshot, now, body)))
}

fn build_artifact(
    format: ExportFormat,
    snapshot: &ExportSnapshot,
    now: NaiveDateTime,
    bytes: Vec<u8>,
) -> Artifact {
    Artifact {
        filename: export_filename(&snapshot.query.keywords, format.extension(), now.date()),
        mime: format.mime().to_string(),
        bytes,
    }
}

/// Export timestamp as `dd/mm/yyyy HH:MM`.
fn export_timestamp(now: NaiveDateTime) -> String {
    now.format("%d/%m/%Y %H:%M").to_string()
}

/// Query period as `dd/mm/yyyy a dd/mm/yyyy`.
fn period_label(query: &SearchQuery) -> String {
    format!(
        "{} a {}",
        crate::domain::display_date(query.period_start),
        crate::domain::display_date(query.period_end)
    )
}

//! Error types for journal-scout.
//!
//! This module defines the per-concern error enums ([`ValidationError`],
//! [`SearchError`], [`ExportError`]) and the crate-wide [`ScoutError`] that
//! aggregates them, together with the [`Result`] alias used throughout the
//! crate. All errors are implemented with `thiserror`.
//!
//! The propagation policy is split by kind:
//!
//! - Validation failures block the operation and are shown to the user.
//! - Network failures are converted into fallback data plus a warning by the
//!   component that hit them, so they rarely reach the event loop.
//! - Export failures abort the single export and are reported as a notice.

use thiserror::Error;

/// Form input that cannot be turned into a [`SearchQuery`](super::SearchQuery).
///
/// These are user-correctable; the search is not submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Keywords were empty or whitespace-only after trimming.
    #[error("Por favor, informe pelo menos uma palavra-chave para busca.")]
    EmptyKeywords,

    /// A date field did not parse as `YYYY-MM-DD`.
    ///
    /// The string names the offending field (`periodo_inicio` or `periodo_fim`).
    #[error("Data inválida no campo {0}")]
    InvalidDate(String),

    /// The period start falls after the period end.
    #[error("A data inicial deve ser anterior ou igual à data final")]
    InvertedPeriod,
}

/// Failure while producing a result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The backend could not be reached or answered with a non-success status.
    #[error("Erro na requisição: {0}")]
    Network(String),

    /// The backend answered but reported an error in its envelope.
    #[error("Erro do servidor: {0}")]
    Backend(String),

    /// The simulated generator has no journal to attribute records to.
    #[error("Nenhuma revista disponível para gerar resultados")]
    EmptyDirectory,
}

/// Failure while exporting the current result set.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The result set store is empty; the user must search first.
    #[error("Não há resultados para exportar. Realize uma busca primeiro.")]
    NoResults,

    /// The requested format name is not one of the known formats.
    #[error("Formato de exportação não suportado: {0}")]
    UnsupportedFormat(String),

    /// The backend rejected the export request.
    #[error("Erro do servidor ao exportar: {0}")]
    Backend(String),

    /// The export request never completed.
    #[error("Erro na requisição de exportação: {0}")]
    Network(String),

    /// The CSV writer rejected a record.
    #[error("Erro ao gerar CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the artifact to disk failed.
    #[error("Erro ao gravar arquivo: {0}")]
    Io(#[from] std::io::Error),
}

/// The main error type for journal-scout operations.
///
/// Wraps the per-concern errors with `#[from]` so `?` works across layers,
/// plus the ambient failure kinds (storage, configuration, theme).
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Form validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Search execution failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Preference storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for journal-scout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;

//! HTTP client for the journal search backend.

use super::wire::{
    disposition_filename, ExportEnvelope, ExportRequest, ExportResponse, LegacyPdfForm,
    SearchEnvelope,
};
use crate::domain::{Journal, ResultRecord, ScoutError, SearchQuery};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

/// Failure talking to the backend.
///
/// Callers translate this into their own error kind: the journal directory
/// and the search executor degrade to fallback data, the export engine
/// surfaces it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection dropped.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// The body did not have the expected shape.
    #[error("resposta inválida: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Typed client for the four backend endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `http://host:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ScoutError> {
        let http = Client::builder()
            .user_agent(concat!("journal-scout/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ScoutError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL the endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET /revistas`: the searchable journals.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    #[tracing::instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_journals(&self) -> Result<Vec<Journal>, ApiError> {
        let response = self.http.get(self.endpoint("revistas")).send().await?;
        let journals: Vec<Journal> = Self::ensure_success(response)?.json().await?;
        tracing::debug!(count = journals.len(), "journals fetched");
        Ok(journals)
    }

    /// `POST /buscar`: runs a search on the backend.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure. An envelope with
    /// `status: "erro"` is *not* an error here; the caller decides.
    #[tracing::instrument(level = "debug", skip(self, query), fields(keywords = %query.keywords, limit = query.limit))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchEnvelope, ApiError> {
        let response = self
            .http
            .post(self.endpoint("buscar"))
            .json(query)
            .send()
            .await?;
        let envelope: SearchEnvelope = Self::ensure_success(response)?.json().await?;
        tracing::debug!(
            status = %envelope.status,
            count = envelope.resultados.as_ref().map_or(0, Vec::len),
            "search envelope received"
        );
        Ok(envelope)
    }

    /// `POST /exportar`: asks the backend to generate a document.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    #[tracing::instrument(level = "debug", skip(self, request), fields(formato = request.formato, count = request.resultados.len()))]
    pub async fn export(&self, request: &ExportRequest<'_>) -> Result<ExportResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("exportar"))
            .json(request)
            .send()
            .await?;
        Self::read_export_response(Self::ensure_success(response)?).await
    }

    /// `POST /exportar/pdf`: the legacy form-encoded PDF endpoint.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    #[tracing::instrument(level = "debug", skip(self, query, records), fields(count = records.len()))]
    pub async fn export_pdf_legacy(
        &self,
        query: &SearchQuery,
        records: &[ResultRecord],
    ) -> Result<ExportResponse, ApiError> {
        let form = LegacyPdfForm {
            palavras: query.keywords.clone(),
            periodo_inicio: query.period_start.to_string(),
            periodo_fim: query.period_end.to_string(),
            resultados: serde_json::to_string(records)
                .map_err(|e| ApiError::Decode(e.to_string()))?,
        };

        let response = self
            .http
            .post(self.endpoint("exportar/pdf"))
            .form(&form)
            .send()
            .await?;
        Self::read_export_response(Self::ensure_success(response)?).await
    }

    fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = status.as_u16(), "backend returned non-success status");
        Err(ApiError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        })
    }

    async fn read_export_response(response: Response) -> Result<ExportResponse, ApiError> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        if is_json {
            let envelope: ExportEnvelope = response.json().await?;
            return Ok(ExportResponse::Envelope(envelope));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_filename);
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(filename = ?filename, size = bytes.len(), "binary export received");
        Ok(ExportResponse::File { filename, bytes })
    }
}

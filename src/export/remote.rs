//! Backend-generated exports (PDF and Excel).

use super::{Artifact, ExportFormat, ExportOutcome, ExportSnapshot};
use crate::api::wire::{ExportRequest, ExportResponse, STATUS_ERROR};
use crate::api::{ApiClient, ApiError};
use crate::domain::ExportError;

/// Requests `format` from the backend.
///
/// A binary response becomes a file named from `Content-Disposition`
/// (default `resultados.<ext>`); a JSON response with a `url` becomes
/// [`ExportOutcome::OpenUrl`].
///
/// # Errors
///
/// - [`ExportError::Network`] when the request fails or gets a non-success status
/// - [`ExportError::Backend`] when the backend answers with an error envelope
///   or with neither a file nor a URL
pub async fn export(
    client: &ApiClient,
    format: ExportFormat,
    snapshot: &ExportSnapshot,
    legacy_pdf_endpoint: bool,
) -> Result<ExportOutcome, ExportError> {
    let response = if legacy_pdf_endpoint && format == ExportFormat::Pdf {
        client
            .export_pdf_legacy(&snapshot.query, &snapshot.records)
            .await
    } else {
        let request = ExportRequest {
            formato: format.name(),
            busca: &snapshot.query,
            resultados: &snapshot.records,
        };
        client.export(&request).await
    }
    .map_err(|e: ApiError| ExportError::Network(e.to_string()))?;

    match response {
        ExportResponse::File { filename, bytes } => {
            let filename = filename
                .filter(|name| !name.contains(['/', '\\']))
                .unwrap_or_else(|| format!("resultados.{}", format.extension()));
            Ok(ExportOutcome::File(Artifact {
                filename,
                mime: format.mime().to_string(),
                bytes,
            }))
        }
        ExportResponse::Envelope(envelope) => {
            if envelope.status == STATUS_ERROR {
                let msg = envelope
                    .msg
                    .unwrap_or_else(|| "falha desconhecida".to_string());
                return Err(ExportError::Backend(msg));
            }
            envelope.url.map(ExportOutcome::OpenUrl).ok_or_else(|| {
                ExportError::Backend(
                    envelope
                        .msg
                        .unwrap_or_else(|| "resposta sem arquivo".to_string()),
                )
            })
        }
    }
}

//! Request and response bodies exchanged with the backend.
//!
//! Field names follow the backend's Portuguese JSON contract; the Rust side
//! uses the domain types wherever the shapes line up.

use crate::domain::{ResultRecord, SearchQuery};
use serde::{Deserialize, Serialize};

/// Envelope status value meaning success.
pub const STATUS_OK: &str = "ok";

/// Envelope status value meaning failure.
pub const STATUS_ERROR: &str = "erro";

/// Response body of `POST /api/buscar`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    /// `"ok"` or `"erro"`.
    pub status: String,
    /// Present on success; may be absent when nothing matched.
    #[serde(default)]
    pub resultados: Option<Vec<ResultRecord>>,
    /// Human-readable message, success or failure.
    #[serde(default)]
    pub msg: Option<String>,
}

impl SearchEnvelope {
    /// Returns `true` when the backend reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// JSON response body of the export endpoints.
///
/// Returned instead of a file when the backend either failed or stored the
/// artifact somewhere and hands back a URL to open.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportEnvelope {
    pub status: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /api/exportar`.
#[derive(Debug, Serialize)]
pub struct ExportRequest<'a> {
    /// Format name: `pdf` or `excel`.
    pub formato: &'a str,
    /// Query that produced the records, for the document header.
    pub busca: &'a SearchQuery,
    /// Records in current view order.
    pub resultados: &'a [ResultRecord],
}

/// Form body of the legacy `POST /api/exportar/pdf` endpoint.
///
/// Dates are sent as ISO strings and the records as one JSON-encoded field.
#[derive(Debug, Serialize)]
pub struct LegacyPdfForm {
    pub palavras: String,
    pub periodo_inicio: String,
    pub periodo_fim: String,
    pub resultados: String,
}

/// What an export endpoint answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResponse {
    /// A binary artifact with the name suggested by `Content-Disposition`.
    File {
        filename: Option<String>,
        bytes: Vec<u8>,
    },
    /// A JSON envelope (error, or URL to open).
    Envelope(ExportEnvelope),
}

/// Extracts the filename from a `Content-Disposition` header value.
///
/// Accepts both quoted and bare values. The RFC 5987 `filename*=` form is
/// percent-decoded and preferred over a plain `filename=`.
///
/// # Example
///
/// ```
/// use journal_scout::api::wire::disposition_filename;
///
/// assert_eq!(
///     disposition_filename(r#"attachment; filename="resultados.pdf""#).as_deref(),
///     Some("resultados.pdf")
/// );
/// assert_eq!(disposition_filename("inline"), None);
/// ```
#[must_use]
pub fn disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            // RFC 5987 extended value: charset'language'percent-encoded
            "filename*" => {
                let encoded = value.split_once("''").map_or(value, |(_, name)| name);
                let decoded = urlencoding::decode_binary(unquote(encoded).as_bytes())
                    .into_owned();
                let name = String::from_utf8_lossy(&decoded).into_owned();
                if !name.is_empty() {
                    return Some(name);
                }
            }
            "filename" if plain.is_none() => {
                let name = unquote(value);
                if !name.is_empty() {
                    plain = Some(name.to_string());
                }
            }
            _ => {}
        }
    }
    plain
}

fn unquote(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

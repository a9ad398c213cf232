//! Backend HTTP interface.
//!
//! The backend exposes four endpoints under a common base URL:
//!
//! - `GET  /revistas`: journal list
//! - `POST /buscar`: search (JSON [`SearchQuery`](crate::domain::SearchQuery) body)
//! - `POST /exportar`: document export (JSON body, JSON or binary response)
//! - `POST /exportar/pdf`: legacy form-encoded PDF export
//!
//! # Modules
//!
//! - [`client`]: the [`ApiClient`] built on `reqwest`
//! - [`wire`]: request/response bodies and header parsing

pub mod client;
pub mod wire;

pub use client::{ApiClient, ApiError};
pub use wire::{ExportEnvelope, ExportRequest, ExportResponse, SearchEnvelope};

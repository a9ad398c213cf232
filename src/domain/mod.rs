//! Domain layer for journal-scout.
//!
//! This module contains the data model shared by every other layer, free of
//! network, storage and rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`journal`]: Searchable journals and specialty groups
//! - [`notice`]: User-visible feedback messages
//! - [`query`]: Validated search criteria
//! - [`record`]: Article records and their sources
//! - [`text`]: Collation helpers for locale-aware sorting

pub mod error;
pub mod journal;
pub mod notice;
pub mod query;
pub mod record;
pub mod text;

pub use error::{ExportError, Result, ScoutError, SearchError, ValidationError};
pub use journal::{Journal, JournalGroup, ALL_JOURNALS, ALL_JOURNALS_LABEL};
pub use notice::{Notice, NoticeLevel};
pub use query::{SearchQuery, DEFAULT_LIMIT};
pub use record::{display_date, ResultRecord, Source};

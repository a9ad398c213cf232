//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the CLI (main.rs) and the catalog, search,
//! export and storage layers. Every user command and every background
//! completion is an [`Event`]; the handler mutates [`AppState`] and emits
//! [`Action`]s that the [`runtime`] executes.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Search / Export Results ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`commands`]: Interactive prompt command language
//! - [`form`]: Raw form inputs and their validation into a query
//! - [`handler`]: Event processing and state transitions
//! - [`results`]: The result set store with sort and filter
//! - [`runtime`]: Action execution and the session loop
//! - [`state`]: Central application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use journal_scout::app::{handle_event, AppState, Event};
//! use journal_scout::app::results::SortColumn;
//! use journal_scout::catalog::JournalDirectory;
//! use journal_scout::ui::theme::{ThemeMode, ThemeSet};
//!
//! let mut state = AppState::new(JournalDirectory::fallback()?, ThemeSet::load(None)?, ThemeMode::Dark);
//! let (redraw, actions) = handle_event(&mut state, Event::SortBy(SortColumn::Title))?;
//! assert!(!redraw && actions.is_empty());
//! # Ok::<(), journal_scout::domain::ScoutError>(())
//! ```

pub mod actions;
pub mod commands;
pub mod form;
pub mod handler;
pub mod results;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use runtime::{Runtime, Session};
pub use state::AppState;

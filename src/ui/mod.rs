//! User interface rendering layer with component-based architecture.
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Width fitting, hyperlinks, ANSI stripping
//! - [`theme`]: Light/dark schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_directory};
pub use theme::{Theme, ThemeMode, ThemeSet};
pub use viewmodel::{
    Cell, ColumnHeader, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, TableRow, UIViewModel,
};

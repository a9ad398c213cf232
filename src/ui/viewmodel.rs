//! View model types for UI rendering.
//!
//! The view model is a pure data snapshot computed from
//! [`AppState`](crate::app::AppState) by `compute_viewmodel`. Components only
//! read from it, so rendering never needs to reach back into application
//! state.

use crate::domain::Notice;

/// Complete renderable snapshot of the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present whenever there is a result set to filter.
    pub filter_bar: Option<FilterBarInfo>,

    /// Column headers in table order.
    pub columns: Vec<ColumnHeader>,

    /// One row per visible record, in view order.
    pub rows: Vec<TableRow>,

    /// Replaces the table rows when there is nothing to show.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Records currently visible.
    pub visible: usize,
    /// Records in the result set.
    pub total: usize,
    /// A search is in flight.
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub text: String,
}

/// A column header with its sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub label: &'static str,
    /// 1-based position, usable as `sort <n>`.
    pub position: usize,
    pub width: usize,
    /// `▲` or `▼` on the sorted column.
    pub indicator: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Cells in column order.
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// Target of an OSC 8 hyperlink around the cell text.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Most recent notices, oldest first.
    pub notices: Vec<Notice>,
    pub keybindings: String,
}

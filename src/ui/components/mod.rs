//! Composable UI components.
//!
//! Each component appends its lines, `\n`-terminated and ANSI-styled, to the
//! output buffer it is given.

mod empty;
mod filter;
mod footer;
mod header;
mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;

use filter::render_filter_bar;
use table::{render_table_headers, render_table_rows};

fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Renders the full results screen.
pub fn render_results(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    render_border(out, &theme.colors.border, cols);

    if let Some(filter) = &vm.filter_bar {
        render_filter_bar(out, filter, theme, cols);
    }

    render_table_headers(out, &vm.columns, theme);
    render_border(out, &theme.colors.border, cols);

    match &vm.empty_state {
        Some(empty) => render_empty_state(out, empty, theme, cols),
        None => render_table_rows(out, &vm.rows, &vm.columns, theme),
    }

    render_border(out, &theme.colors.border, cols);
    render_footer(out, &vm.footer, theme, cols);
}

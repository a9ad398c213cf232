//! Results table component renderer.

use crate::app::state::COLUMN_SEPARATOR;
use crate::ui::helpers::{fit, hyperlink};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, TableRow};

/// Renders the header line, e.g. `1:Título ▲`.
pub fn render_table_headers(out: &mut String, columns: &[ColumnHeader], theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));

    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str(COLUMN_SEPARATOR);
        }
        let label = match column.indicator {
            Some(indicator) => format!("{}:{} {indicator}", column.position, column.label),
            None => format!("{}:{}", column.position, column.label),
        };

        if column.indicator.is_some() {
            out.push_str(&Theme::fg(&theme.colors.sort_indicator_fg));
            out.push_str(&fit(&label, column.width));
            out.push_str(&Theme::fg(&theme.colors.header_fg));
        } else {
            out.push_str(&fit(&label, column.width));
        }
    }

    out.push_str(Theme::reset());
    out.push('\n');
}

pub fn render_table_rows(
    out: &mut String,
    rows: &[TableRow],
    columns: &[ColumnHeader],
    theme: &Theme,
) {
    for row in rows {
        render_table_row(out, row, columns, theme);
    }
}

fn render_table_row(out: &mut String, row: &TableRow, columns: &[ColumnHeader], theme: &Theme) {
    let normal = Theme::fg(&theme.colors.text_normal);
    out.push_str(&normal);

    for (i, (cell, column)) in row.cells.iter().zip(columns).enumerate() {
        if i > 0 {
            out.push_str(&Theme::fg(&theme.colors.border));
            out.push_str(COLUMN_SEPARATOR);
            out.push_str(&normal);
        }

        let text = fit(&cell.text, column.width);
        match &cell.link {
            Some(url) => {
                out.push_str(&Theme::fg(&theme.colors.link_fg));
                out.push_str(&hyperlink(url, &text));
                out.push_str(&normal);
            }
            None => out.push_str(&text),
        }
    }

    out.push_str(Theme::reset());
    out.push('\n');
}

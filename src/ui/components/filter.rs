//! Filter bar component renderer.

use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

const FILTER_BOX_MARGIN: usize = 2;

/// Renders a three-line framed box showing the active filter text.
pub fn render_filter_bar(out: &mut String, filter: &FilterBarInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(FILTER_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.filter_bar_border);

    let text = if filter.text.is_empty() {
        " Filtrar: (vazio)".to_string()
    } else {
        format!(" Filtrar: {}", filter.text)
    };

    out.push_str(&format!(
        "{margin}{border}┌{}┐{}\n",
        "─".repeat(inner_width),
        Theme::reset()
    ));
    out.push_str(&format!(
        "{margin}{border}│{}{}{border}│{}\n",
        Theme::fg(&theme.colors.text_normal),
        fit(&text, inner_width),
        Theme::reset()
    ));
    out.push_str(&format!(
        "{margin}{border}└{}┘{}\n",
        "─".repeat(inner_width),
        Theme::reset()
    ));
}

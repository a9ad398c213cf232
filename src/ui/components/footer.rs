//! Footer component renderer.
//!
//! Renders recent notices, each colored by level, followed by the centered
//! command hints.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    for notice in &footer.notices {
        out.push_str(&Theme::fg(theme.colors.notice_fg(notice.level)));
        out.push_str(&notice.to_string());
        out.push_str(Theme::reset());
        out.push('\n');
    }

    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&center(&footer.keybindings, cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

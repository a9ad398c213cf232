//! Header component renderer.
//!
//! Renders the centered title bar with the result count and, while a search
//! is running, a loading marker.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let count = if header.visible == header.total {
        format!("{} resultado(s)", header.total)
    } else {
        format!("{} de {} resultado(s)", header.visible, header.total)
    };
    let title = format!("{} ({count})", header.title);

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&center(&title, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    if header.loading {
        out.push_str(&Theme::fg(&theme.colors.loading_fg));
        out.push_str(&center("⏳ Buscando artigos...", cols));
        out.push_str(Theme::reset());
        out.push('\n');
    }
}

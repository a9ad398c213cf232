//! Top-level rendering coordinator.
//!
//! Turns application state into a block of ANSI-styled text. Nothing here
//! writes to the terminal; callers print the returned string.

use crate::app::AppState;
use crate::catalog::JournalDirectory;
use crate::domain::{ALL_JOURNALS, ALL_JOURNALS_LABEL};
use crate::ui::components;
use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the results screen for a terminal `cols` wide.
///
/// # Example
///
/// ```
/// use journal_scout::app::AppState;
/// use journal_scout::catalog::JournalDirectory;
/// use journal_scout::ui::helpers::strip_ansi;
/// use journal_scout::ui::render;
/// use journal_scout::ui::theme::{ThemeMode, ThemeSet};
///
/// let state = AppState::new(
///     JournalDirectory::fallback()?,
///     ThemeSet::load(None)?,
///     ThemeMode::Dark,
/// );
/// let screen = strip_ansi(&render(&state, 100));
/// assert!(screen.contains("1:Título"));
/// # Ok::<(), journal_scout::domain::ScoutError>(())
/// ```
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(cols);
    render_viewmodel(&viewmodel, state.theme(), cols)
}

/// Renders an already computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    components::render_results(&mut out, vm, theme, cols);
    out
}

/// Renders the journal directory grouped by specialty.
///
/// The "all journals" entry comes first, then each specialty as a bold
/// heading followed by its journals as `id  name (ISSN)`.
#[must_use]
pub fn render_directory(directory: &JournalDirectory, theme: &Theme, cols: usize) -> String {
    let id_width = directory
        .journals()
        .map(|j| j.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(ALL_JOURNALS.len());

    let mut out = String::new();
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    let all = format!("{}  {ALL_JOURNALS_LABEL}", fit(ALL_JOURNALS, id_width));
    out.push_str(fit(&all, cols).trim_end());
    out.push_str(Theme::reset());
    out.push('\n');

    for group in directory.groups() {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.header_fg));
        out.push_str(&group.specialty);
        out.push_str(Theme::reset());
        out.push('\n');

        for journal in &group.journals {
            let line = if journal.issn.is_empty() {
                format!("  {}  {}", fit(&journal.id, id_width), journal.name)
            } else {
                format!(
                    "  {}  {} ({})",
                    fit(&journal.id, id_width),
                    journal.name,
                    journal.issn
                )
            };
            out.push_str(&Theme::fg(&theme.colors.text_normal));
            out.push_str(fit(&line, cols).trim_end());
            out.push_str(Theme::reset());
            out.push('\n');
        }
    }

    if directory.is_fallback() {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str("(lista padrão: servidor indisponível)");
        out.push_str(Theme::reset());
        out.push('\n');
    }
    out
}

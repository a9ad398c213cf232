//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` and the
//! [`Runtime`](crate::app::runtime::Runtime) carries them out: spawning
//! searches, producing export files, persisting the theme.

use crate::domain::SearchQuery;
use crate::export::{ExportFormat, ExportSnapshot};
use crate::ui::theme::ThemeMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run `query` in the background and report back with `seq`.
    ExecuteSearch { seq: u64, query: SearchQuery },

    /// Export `snapshot` as `format` and write the result to the export directory.
    Export {
        format: ExportFormat,
        snapshot: ExportSnapshot,
    },

    /// Store the theme mode in the preferences file.
    PersistTheme(ThemeMode),
}

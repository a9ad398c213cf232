//! Platform path helpers.
//!
//! Resolves the data directory (preferences and log file) and expands `~` in
//! user-supplied paths.

use std::path::PathBuf;

const APP_DIR: &str = "journal-scout";

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Default data directory.
///
/// `$XDG_DATA_HOME/journal-scout` when set, else
/// `~/.local/share/journal-scout`, else `./.journal-scout`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    home_dir().map_or_else(
        || PathBuf::from(format!(".{APP_DIR}")),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Resolves the configured data directory, falling back to [`default_data_dir`].
#[must_use]
pub fn get_data_dir(configured: Option<&str>) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map_or_else(default_data_dir, expand_tilde)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or when `HOME` is unset, are returned as is.
///
/// # Example
///
/// ```
/// use journal_scout::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/tmp/out"), PathBuf::from("/tmp/out"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path {
        "~" => "",
        p => match p.strip_prefix("~/") {
            Some(rest) => rest,
            None => return PathBuf::from(path),
        },
    };

    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

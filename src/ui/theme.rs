//! Theme management and ANSI escape sequence generation.
//!
//! The application has two color schemes, `claro` (light) and `escuro`
//! (dark), selected by the persisted [`ThemeMode`]. Each is a TOML file
//! compiled into the binary; a custom TOML file can replace either one.
//!
//! # TOML Format
//!
//! ```toml
//! name = "meu-tema"
//! mode = "escuro"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! header_bg = "#1f3a5f"      # optional
//! text_normal = "#c9d1d9"
//! text_dim = "#8b949e"
//! border = "#30363d"
//! filter_bar_border = "#58a6ff"
//! sort_indicator_fg = "#f2cc60"
//! link_fg = "#58a6ff"
//! empty_state_fg = "#79c0ff"
//! loading_fg = "#d2a8ff"
//! success_fg = "#3fb950"
//! warning_fg = "#d29922"
//! error_fg = "#f85149"
//! ```

use crate::domain::error::{Result, ScoutError};
use crate::domain::NoticeLevel;
use crate::storage::{PreferenceStore, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[serde(rename = "claro")]
    Light,
    #[default]
    #[serde(rename = "escuro")]
    Dark,
}

impl ThemeMode {
    /// Persisted value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "claro",
            Self::Dark => "escuro",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Reads the stored mode, defaulting to dark when absent or unrecognized.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        store
            .get(THEME_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Persists this mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(self, store: &mut dyn PreferenceStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claro" | "light" => Ok(Self::Light),
            "escuro" | "dark" => Ok(Self::Dark),
            other => Err(ScoutError::Theme(format!("unknown theme mode: {other}"))),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color scheme for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// The mode this scheme is used for.
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer hints and secondary text.
    pub text_dim: String,
    pub border: String,

    pub filter_bar_border: String,
    pub sort_indicator_fg: String,
    pub link_fg: String,

    pub empty_state_fg: String,
    pub loading_fg: String,

    pub success_fg: String,
    pub warning_fg: String,
    pub error_fg: String,
}

impl ThemeColors {
    /// Foreground color for a notice of `level`.
    #[must_use]
    pub fn notice_fg(&self, level: NoticeLevel) -> &str {
        match level {
            NoticeLevel::Success => &self.success_fg,
            NoticeLevel::Warning => &self.warning_fg,
            NoticeLevel::Error => &self.error_fg,
        }
    }
}

impl Theme {
    /// Returns the built-in scheme for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Theme`] if the embedded TOML fails to parse.
    pub fn builtin(mode: ThemeMode) -> Result<Self> {
        let toml_str = match mode {
            ThemeMode::Light => include_str!("../../themes/claro.toml"),
            ThemeMode::Dark => include_str!("../../themes/escuro.toml"),
        };

        toml::from_str(toml_str)
            .map_err(|e| ScoutError::Theme(format!("built-in theme {mode}: {e}")))
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScoutError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ScoutError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use journal_scout::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#3a6ea8"), "\u{1b}[38;2;58;110;168m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// The light and dark schemes in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    light: Theme,
    dark: Theme,
}

impl ThemeSet {
    /// Built-in schemes, with `custom` (if given) replacing the one for its mode.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Theme`] if a scheme cannot be loaded.
    pub fn load(custom: Option<&Path>) -> Result<Self> {
        let mut set = Self {
            light: Theme::builtin(ThemeMode::Light)?,
            dark: Theme::builtin(ThemeMode::Dark)?,
        };

        if let Some(path) = custom {
            let theme = Theme::from_file(path)?;
            tracing::debug!(name = %theme.name, mode = %theme.mode, "custom theme loaded");
            match theme.mode {
                ThemeMode::Light => set.light = theme,
                ThemeMode::Dark => set.dark = theme,
            }
        }
        Ok(set)
    }

    #[must_use]
    pub fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

//! Shared rendering utilities.
//!
//! Widths are counted in `char`s, which matches terminal columns for the
//! Latin text this application displays.

/// Fits `text` into exactly `width` columns.
///
/// Longer text is cut and ends with `…`; shorter text is padded with spaces.
///
/// # Example
///
/// ```
/// use journal_scout::ui::helpers::fit;
///
/// assert_eq!(fit("Radiologia", 6), "Radio…");
/// assert_eq!(fit("AJR", 6), "AJR   ");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        let mut out = String::with_capacity(text.len() + width - len);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - len));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Centers `text` within `width` columns.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Wraps already-fitted `text` in an OSC 8 terminal hyperlink to `url`.
///
/// Terminals without OSC 8 support show the text unchanged.
#[must_use]
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\u{1b}]8;;{url}\u{1b}\\{text}\u{1b}]8;;\u{1b}\\")
}

/// Removes ANSI CSI and OSC sequences, leaving the visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\u{7}' {
                        break;
                    }
                    if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    out
}

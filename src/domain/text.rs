//! Text folding helpers shared by sorting and filtering.
//!
//! Sorting needs an ordering close to the Portuguese locale collation the
//! journal names and article titles are written in, without pulling an ICU
//! dependency: letters are lowercased and common Latin diacritics fold to
//! their base letter, so "Ética" sorts next to "etiologia" instead of after
//! "zoologia".

use std::cmp::Ordering;

/// Returns the collation key for `text`.
///
/// The key is lowercase with Latin-1 and Latin Extended-A accents removed.
///
/// # Example
///
/// ```
/// use journal_scout::domain::text::collation_key;
///
/// assert_eq!(collation_key("Ortopedia Pediátrica"), "ortopedia pediatrica");
/// assert_eq!(collation_key("AÇÃO"), "acao");
/// ```
#[must_use]
pub fn collation_key(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

/// Compares two strings the way a user expects a sorted list to read.
///
/// Primary order is the [`collation_key`]; strings that fold to the same key
/// fall back to their plain lowercase form so the order stays total.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

const fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' => 't',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_sort_with_their_base_letter() {
        let mut names = vec!["Zoologia", "Ética Médica", "etiologia", "Anatomia"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["Anatomia", "Ética Médica", "etiologia", "Zoologia"]);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(locale_cmp("radiology", "Radiology"), Ordering::Equal);
        assert_eq!(locale_cmp("ajr", "RadioGraphics"), Ordering::Less);
    }
}

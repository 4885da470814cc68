//! URL slug derivation from display names

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new("[^a-z0-9]+").expect("slug separator pattern is valid"))
}

/// Derive a URL-safe slug from an event name.
///
/// Diacritics are stripped first (NFD, drop combining marks), then the result
/// is lowercased, every run of characters outside `[a-z0-9]` collapses to a
/// single hyphen and leading or trailing hyphens are trimmed.
pub fn slug_for(name: &str) -> String {
    let stripped: String =
        name.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect::<String>().to_lowercase();
    separator_regex().replace_all(&stripped, "-").trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_removed_before_hyphenation() {
        assert_eq!(slug_for("Our Lady of Fátima"), "our-lady-of-fatima");
    }

    #[test]
    fn test_punctuation_runs_collapse() {
        assert_eq!(slug_for("  Kibeho -- (Rwanda)!  "), "kibeho-rwanda");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(slug_for(""), "");
        assert_eq!(slug_for("¿?"), "");
    }
}

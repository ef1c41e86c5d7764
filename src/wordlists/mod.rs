//! Dictionaries for Wordle solving
//!
//! Embedded per-language word tables plus loading from plain word files.

mod embedded;
pub mod loader;

pub use embedded::{DANISH, DANISH_COUNT, ENGLISH, ENGLISH_COUNT};
pub use loader::{Dictionary, DictionarySource, Language, ResourceLoadError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_count_matches_const() {
        assert_eq!(ENGLISH.len(), ENGLISH_COUNT);
    }

    #[test]
    fn danish_count_matches_const() {
        assert_eq!(DANISH.len(), DANISH_COUNT);
    }

    #[test]
    fn tables_have_no_blank_lines() {
        for &word in ENGLISH.iter().chain(DANISH) {
            assert!(!word.trim().is_empty());
            assert_eq!(word, word.trim(), "Word '{word}' has surrounding whitespace");
        }
    }

    #[test]
    fn english_table_has_five_letter_words() {
        let five = ENGLISH
            .iter()
            .filter(|w| w.chars().count() == 5 && w.chars().all(|c| c.is_ascii_lowercase()))
            .count();
        assert!(five > 400, "only {five} five-letter words");
    }

    #[test]
    fn danish_table_uses_danish_letters() {
        assert!(DANISH.iter().any(|w| w.contains('æ')));
        assert!(DANISH.iter().any(|w| w.contains('ø')));
        assert!(DANISH.iter().any(|w| w.contains('å')));
    }
}

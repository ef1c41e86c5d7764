//! Dictionary loading utilities
//!
//! Builds a [`Dictionary`] from an embedded language table or from a word file,
//! filtered to one word length.

use super::{DANISH, ENGLISH};
use crate::core::{Alphabet, Word, alphabet_of};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Languages with an embedded dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Danish,
}

impl Language {
    /// Look up a language by name ("english"/"en", "danish"/"da")
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "danish" | "da" => Some(Self::Danish),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Danish => "danish",
        }
    }

    /// Raw embedded word table, before any filtering
    #[must_use]
    pub const fn embedded_words(self) -> &'static [&'static str] {
        match self {
            Self::English => ENGLISH,
            Self::Danish => DANISH,
        }
    }

    /// Letters whose presence drops a word from this language's dictionary
    #[must_use]
    pub const fn excluded_letters(self) -> &'static [char] {
        match self {
            Self::English => &[],
            Self::Danish => &['é', 'í', 'ó', 'ö', 'ü'],
        }
    }
}

/// Where dictionary words come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// Table compiled into the binary
    Embedded(Language),
    /// Plain text file, one word per line
    File(PathBuf),
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded(language) => write!(f, "embedded {} dictionary", language.name()),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Dictionary could not be loaded
#[derive(Debug)]
pub enum ResourceLoadError {
    /// The word file is missing or unreadable
    Io { path: PathBuf, source: io::Error },
    /// Nothing usable of the requested length
    NoWords { source: String, word_length: usize },
}

impl fmt::Display for ResourceLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read dictionary {}: {source}", path.display())
            }
            Self::NoWords {
                source,
                word_length,
            } => write!(f, "No {word_length}-letter words in {source}"),
        }
    }
}

impl std::error::Error for ResourceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NoWords { .. } => None,
        }
    }
}

/// Immutable set of same-length words plus the alphabet they use
///
/// Words are kept sorted and deduplicated.
#[derive(Debug, Clone)]
pub struct Dictionary {
    word_length: usize,
    words: Vec<Word>,
    alphabet: Alphabet,
}

impl Dictionary {
    /// Build a dictionary from words, keeping those of `word_length` letters
    ///
    /// # Errors
    /// Returns `ResourceLoadError::NoWords` if no word has the requested length.
    pub fn new(
        words: impl IntoIterator<Item = Word>,
        word_length: usize,
        source: &str,
    ) -> Result<Self, ResourceLoadError> {
        let mut words: Vec<Word> = words
            .into_iter()
            .filter(|w| w.len() == word_length)
            .collect();
        words.sort();
        words.dedup();

        if words.is_empty() {
            return Err(ResourceLoadError::NoWords {
                source: source.to_string(),
                word_length,
            });
        }

        let alphabet = alphabet_of(&words);
        Ok(Self {
            word_length,
            words,
            alphabet,
        })
    }

    /// Load a dictionary for `language` from `source`
    ///
    /// The language's letter exclusions apply to file sources too.
    ///
    /// # Errors
    ///
    /// Returns a `ResourceLoadError` if the file cannot be read or nothing of
    /// `word_length` letters survives filtering.
    ///
    /// # Examples
    /// ```
    /// use wordle_frequency::wordlists::loader::{Dictionary, DictionarySource, Language};
    ///
    /// let source = DictionarySource::Embedded(Language::English);
    /// let dictionary = Dictionary::load(&source, Language::English, 5).unwrap();
    /// assert!(dictionary.contains("crane"));
    /// ```
    pub fn load(
        source: &DictionarySource,
        language: Language,
        word_length: usize,
    ) -> Result<Self, ResourceLoadError> {
        let words = match source {
            DictionarySource::Embedded(embedded) => {
                parse_words(embedded.embedded_words().iter().copied(), language)
            }
            DictionarySource::File(path) => load_from_file(path, language)?,
        };

        let dictionary = Self::new(words, word_length, &source.to_string())?;
        log::info!(
            "Loaded {} {word_length}-letter words from {source} ({} letters in alphabet)",
            dictionary.len(),
            dictionary.alphabet.len()
        );
        Ok(dictionary)
    }

    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    /// All words, in lexicographic order
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: construction rejects empty dictionaries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Look up a word by text (case-insensitive)
    #[must_use]
    pub fn get(&self, text: &str) -> Option<&Word> {
        let text = text.trim().to_lowercase();
        self.words
            .binary_search_by(|w| w.text().cmp(&text))
            .ok()
            .map(|i| &self.words[i])
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.get(text).is_some()
    }
}

/// Load words from a file
///
/// # Errors
///
/// Returns `ResourceLoadError::Io` if the file cannot be read.
pub fn load_from_file<P: AsRef<Path>>(
    path: P,
    language: Language,
) -> Result<Vec<Word>, ResourceLoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ResourceLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_words(content.lines(), language))
}

/// Turn raw lines into words
///
/// Skips blank lines, capitalised entries (proper nouns), anything that is not
/// a plain alphabetic word and words with letters the language excludes.
#[must_use]
pub fn parse_words<'a>(lines: impl IntoIterator<Item = &'a str>, language: Language) -> Vec<Word> {
    let excluded = language.excluded_letters();

    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed != trimmed.to_lowercase() {
                return None;
            }
            if trimmed.chars().any(|c| excluded.contains(&c)) {
                return None;
            }
            Word::new(trimmed).ok()
        })
        .collect()
}

//! Wordle Frequency
//!
//! A Wordle solver that narrows a dictionary from feedback and suggests the
//! candidate whose letters appear in the most remaining candidates.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_frequency::core::Word;
//! use wordle_frequency::solver::{KnowledgeStore, suggest};
//! use wordle_frequency::wordlists::{Dictionary, DictionarySource, Language};
//!
//! let source = DictionarySource::Embedded(Language::English);
//! let dictionary = Dictionary::load(&source, Language::English, 5).unwrap();
//! let mut store = KnowledgeStore::new(5, dictionary.words(), dictionary.alphabet());
//!
//! let guess = suggest(dictionary.alphabet(), store.candidates()).unwrap().clone();
//! store.update_from_str(guess.text(), "GYGGE").unwrap();
//!
//! assert!(store.candidates().iter().all(|w| w.letter_at(4) == guess.letter_at(4)));
//! ```

// Core domain types
pub mod core;

// Knowledge, suggestion and sessions
pub mod solver;

// Dictionaries
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

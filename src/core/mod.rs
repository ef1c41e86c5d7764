//! Core domain types for Wordle
//!
//! Words, feedback marks and alphabets. Nothing here knows about dictionaries
//! or sessions.

mod feedback;
mod word;

pub use feedback::{Feedback, Mark, Rules, ValidationError};
pub use word::{Word, WordError};

use std::collections::BTreeSet;

/// Set of letters appearing in a dictionary, kept sorted for display
pub type Alphabet = BTreeSet<char>;

/// Collect every letter used by `words`
#[must_use]
pub fn alphabet_of<'a>(words: impl IntoIterator<Item = &'a Word>) -> Alphabet {
    words
        .into_iter()
        .flat_map(|w| w.letters().iter().copied())
        .collect()
}

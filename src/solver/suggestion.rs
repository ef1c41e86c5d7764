//! Letter-coverage guess suggestion
//!
//! A greedy stand-in for information gain: letters that appear in many
//! candidates split the candidate set well, so the best guess is the
//! candidate whose distinct letters appear in the most candidates.

use crate::core::{Alphabet, Word};
use rustc_hash::FxHashMap;
use std::fmt;

/// `suggest` was called with no candidates left
///
/// Signals inconsistent feedback or an exhausted dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoCandidatesError;

impl fmt::Display for NoCandidatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No candidates remain; the feedback may be inconsistent")
    }
}

impl std::error::Error for NoCandidatesError {}

/// A candidate with its coverage score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored<'a> {
    pub word: &'a Word,
    pub score: usize,
}

/// Count, for every letter, how many candidates contain it at least once
///
/// Letters of the alphabet that no candidate uses are present with a count of 0.
#[must_use]
pub fn letter_occurrences<'a>(
    alphabet: &Alphabet,
    candidates: impl IntoIterator<Item = &'a Word>,
) -> FxHashMap<char, usize> {
    let mut occurrences: FxHashMap<char, usize> =
        alphabet.iter().map(|&letter| (letter, 0)).collect();

    for word in candidates {
        for letter in word.distinct_letters() {
            *occurrences.entry(letter).or_insert(0) += 1;
        }
    }

    occurrences
}

/// Sum of the occurrence counts of a word's distinct letters
#[must_use]
pub fn coverage(word: &Word, occurrences: &FxHashMap<char, usize>) -> usize {
    word.distinct_letters()
        .iter()
        .map(|letter| occurrences.get(letter).copied().unwrap_or(0))
        .sum()
}

/// Pick the candidate with the strictly highest coverage score
///
/// Ties go to the earliest candidate in iteration order, which is
/// lexicographic for the knowledge store's candidate set.
///
/// # Errors
///
/// Returns `NoCandidatesError` if `candidates` is empty.
///
/// # Examples
/// ```
/// use wordle_frequency::core::{Word, alphabet_of};
/// use wordle_frequency::solver::suggest;
///
/// let candidates: Vec<Word> = ["cigar", "rebut", "sissy", "humph", "awake"]
///     .iter()
///     .map(|w| Word::new(w).unwrap())
///     .collect();
/// let alphabet = alphabet_of(&candidates);
///
/// let best = suggest(&alphabet, &candidates).unwrap();
/// assert!(candidates.contains(best));
/// ```
pub fn suggest<'a, I>(alphabet: &Alphabet, candidates: I) -> Result<&'a Word, NoCandidatesError>
where
    I: IntoIterator<Item = &'a Word>,
    I::IntoIter: Clone,
{
    suggest_scored(alphabet, candidates).map(|best| best.word)
}

/// Like [`suggest`], also returning the winning score
///
/// # Errors
///
/// Returns `NoCandidatesError` if `candidates` is empty.
pub fn suggest_scored<'a, I>(alphabet: &Alphabet, candidates: I) -> Result<Scored<'a>, NoCandidatesError>
where
    I: IntoIterator<Item = &'a Word>,
    I::IntoIter: Clone,
{
    let candidates = candidates.into_iter();
    let occurrences = letter_occurrences(alphabet, candidates.clone());

    let mut best: Option<Scored<'a>> = None;
    for word in candidates {
        let score = coverage(word, &occurrences);
        if best.is_none_or(|b| score > b.score) {
            best = Some(Scored { word, score });
        }
    }

    best.ok_or(NoCandidatesError)
}

/// Every candidate with its score, best first (ties in iteration order)
#[must_use]
pub fn rank<'a, I>(alphabet: &Alphabet, candidates: I) -> Vec<Scored<'a>>
where
    I: IntoIterator<Item = &'a Word>,
    I::IntoIter: Clone,
{
    let candidates = candidates.into_iter();
    let occurrences = letter_occurrences(alphabet, candidates.clone());

    let mut ranked: Vec<Scored<'a>> = candidates
        .map(|word| Scored {
            word,
            score: coverage(word, &occurrences),
        })
        .collect();
    // Stable sort keeps iteration order among equal scores
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

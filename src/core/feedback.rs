//! Wordle feedback calculation and representation
//!
//! Feedback is one mark per position of the guess:
//! - `Exact` (E) = letter correct and in place
//! - `Present` (Y) = letter in word, wrong place
//! - `Absent` (G) = letter not in word (grey)
//!
//! How repeated letters are scored depends on the [`Rules`] in effect.

use super::{Word, WordError};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// Verdict for a single position of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Exact,
    Present,
    Absent,
}

impl Mark {
    /// Parse a single feedback symbol
    ///
    /// Accepts:
    /// - 'E'/'e'/🟩 for exact
    /// - 'Y'/'y'/🟨 for present
    /// - 'G'/'g'/'-'/'_'/⬜ for absent
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'E' | 'e' | '🟩' => Some(Self::Exact),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            'G' | 'g' | '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }

    /// Canonical single-letter symbol
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Exact => 'E',
            Self::Present => 'Y',
            Self::Absent => 'G',
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// True for `Exact` and `Present`
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Exact | Self::Present)
    }
}

/// How repeated letters are treated, both when scoring a guess and when
/// the knowledge store interprets an `Absent` mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rules {
    /// Per-position scoring without duplicate correction; an `Absent` letter is
    /// excluded everywhere even if it is a hit elsewhere in the same guess.
    #[default]
    Simple,
    /// Standard two-pass Wordle scoring; an `Absent` mark on a letter that is
    /// also a hit caps that letter's occurrence count instead of excluding it.
    DuplicateAware,
}

impl Rules {
    /// Look up rules by name: "simple" or "exact"/"duplicate-aware"
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(Self::Simple),
            "exact" | "duplicate-aware" => Some(Self::DuplicateAware),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::DuplicateAware => "duplicate-aware",
        }
    }
}

/// Rejected guess/feedback input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Guess length differs from the session's word length
    GuessLength { expected: usize, actual: usize },
    /// Feedback length differs from the session's word length
    FeedbackLength { expected: usize, actual: usize },
    /// Feedback symbol is not one of the recognized marks
    UnknownMark { symbol: char, position: usize },
    /// Guess text is not a valid word
    InvalidWord(WordError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GuessLength { expected, actual } => {
                write!(f, "Guess must be {expected} letters, got {actual}")
            }
            Self::FeedbackLength { expected, actual } => {
                write!(f, "Feedback must have {expected} marks, got {actual}")
            }
            Self::UnknownMark { symbol, position } => write!(
                f,
                "Unknown feedback symbol '{symbol}' at position {}; use E/Y/G",
                position + 1
            ),
            Self::InvalidWord(e) => write!(f, "Invalid guess: {e}"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<WordError> for ValidationError {
    fn from(e: WordError) -> Self {
        Self::InvalidWord(e)
    }
}

/// Feedback for one guess, aligned with the guess letters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback(Vec<Mark>);

impl Feedback {
    #[must_use]
    pub const fn new(marks: Vec<Mark>) -> Self {
        Self(marks)
    }

    /// All-exact feedback of the given length
    #[must_use]
    pub fn solved(len: usize) -> Self {
        Self(vec![Mark::Exact; len])
    }

    #[inline]
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terminal condition: every mark is `Exact`
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&m| m == Mark::Exact)
    }

    /// Score `guess` against a known `target`
    ///
    /// With [`Rules::Simple`] every position is judged independently: equal letters
    /// are `Exact`, a letter found anywhere in the target is `Present`, otherwise
    /// `Absent`. With [`Rules::DuplicateAware`] greens are marked first and consume
    /// the target's letter pool, then yellows are handed out from what is left.
    ///
    /// Both words must have the same length.
    ///
    /// # Examples
    /// ```
    /// use wordle_frequency::core::{Feedback, Rules, Word};
    ///
    /// let guess = Word::new("speed").unwrap();
    /// let target = Word::new("abide").unwrap();
    ///
    /// let simple = Feedback::score(&guess, &target, Rules::Simple);
    /// assert_eq!(simple.to_string(), "GGYYY");
    ///
    /// let exact = Feedback::score(&guess, &target, Rules::DuplicateAware);
    /// assert_eq!(exact.to_string(), "GGYGY");
    /// ```
    #[must_use]
    pub fn score(guess: &Word, target: &Word, rules: Rules) -> Self {
        debug_assert_eq!(guess.len(), target.len(), "guess and target lengths differ");

        match rules {
            Rules::Simple => Self(
                guess
                    .letters()
                    .iter()
                    .zip(target.letters())
                    .map(|(&g, &t)| {
                        if g == t {
                            Mark::Exact
                        } else if target.has_letter(g) {
                            Mark::Present
                        } else {
                            Mark::Absent
                        }
                    })
                    .collect(),
            ),
            Rules::DuplicateAware => Self::score_duplicate_aware(guess, target),
        }
    }

    fn score_duplicate_aware(guess: &Word, target: &Word) -> Self {
        let mut marks = vec![Mark::Absent; guess.len()];
        let mut available: FxHashMap<char, usize> = FxHashMap::default();

        // First pass: greens, everything else feeds the pool
        for (i, (&g, &t)) in guess.letters().iter().zip(target.letters()).enumerate() {
            if g == t {
                marks[i] = Mark::Exact;
            } else {
                *available.entry(t).or_insert(0) += 1;
            }
        }

        // Second pass: yellows from what is left
        for (i, &g) in guess.letters().iter().enumerate() {
            if marks[i] == Mark::Exact {
                continue;
            }
            if let Some(count) = available.get_mut(&g)
                && *count > 0
            {
                marks[i] = Mark::Present;
                *count -= 1;
            }
        }

        Self(marks)
    }

    /// Convert to emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|m| m.emoji()).collect()
    }
}

impl FromStr for Feedback {
    type Err = ValidationError;

    /// Parse feedback like "EYGGE", "ey--e" or "🟩🟨⬜⬜🟩"; whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(position, symbol)| {
                Mark::from_symbol(symbol).ok_or(ValidationError::UnknownMark { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn score(guess: &str, target: &str, rules: Rules) -> String {
        Feedback::score(&word(guess), &word(target), rules).to_string()
    }

    #[test]
    fn score_all_absent() {
        assert_eq!(score("abcde", "fghij", Rules::Simple), "GGGGG");
        assert_eq!(score("abcde", "fghij", Rules::DuplicateAware), "GGGGG");
    }

    #[test]
    fn score_all_exact_is_solved() {
        for rules in [Rules::Simple, Rules::DuplicateAware] {
            let feedback = Feedback::score(&word("crane"), &word("crane"), rules);
            assert!(feedback.is_solved());
            assert_eq!(feedback, Feedback::solved(5));
        }
    }

    #[test]
    fn score_real_example() {
        // CRANE vs SLATE: only A and E line up, R/C/N are absent
        assert_eq!(score("crane", "slate", Rules::Simple), "GGEGE");
        assert_eq!(score("crane", "slate", Rules::DuplicateAware), "GGEGE");
    }

    #[test]
    fn simple_scoring_ignores_duplicates() {
        // SPEED vs ABIDE: both E's are yellow, though ABIDE has a single E
        assert_eq!(score("speed", "abide", Rules::Simple), "GGYYY");
    }

    #[test]
    fn simple_scoring_marks_extra_copy_present_next_to_exact() {
        // APPLE vs ANGLE: no P in target, L lines up
        assert_eq!(score("apple", "angle", Rules::Simple), "EGGEE");
        // ROBOT vs FLOOR: first O yellow (wrong place), second O green
        assert_eq!(score("robot", "floor", Rules::Simple), "YYGEG");
        // EERIE vs THREE: both leading E's are yellow under the simple rule
        assert_eq!(score("eerie", "three", Rules::Simple), "YYEGE");
    }

    #[test]
    fn duplicate_aware_scoring_consumes_pool() {
        assert_eq!(score("speed", "abide", Rules::DuplicateAware), "GGYGY");
        assert_eq!(score("robot", "floor", Rules::DuplicateAware), "YYGEG");
        assert_eq!(score("eerie", "three", Rules::DuplicateAware), "YGEGE");
        // SPEED vs ERASE: two E's in target, so both are yellow
        assert_eq!(score("speed", "erase", Rules::DuplicateAware), "YGYYG");
    }

    #[test]
    fn score_non_ascii() {
        assert_eq!(score("bølge", "bælte", Rules::Simple), "EGEGE");
    }

    #[test]
    fn parse_feedback_symbols() {
        let p1: Feedback = "EYG--".parse().unwrap();
        let p2: Feedback = "🟩🟨⬜⬜⬜".parse().unwrap();
        let p3: Feedback = "ey g_g".parse().unwrap();

        assert_eq!(p1, p2);
        assert_eq!(p1, p3);
        assert_eq!(
            p1.marks(),
            &[Mark::Exact, Mark::Present, Mark::Absent, Mark::Absent, Mark::Absent]
        );
    }

    #[test]
    fn parse_feedback_unknown_symbol() {
        let err = "EYXGG".parse::<Feedback>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownMark {
                symbol: 'X',
                position: 2
            }
        );
    }

    #[test]
    fn parse_feedback_keeps_length() {
        // Length is checked by the knowledge store, not the parser
        assert_eq!("EYG".parse::<Feedback>().unwrap().len(), 3);
        assert!("".parse::<Feedback>().unwrap().is_empty());
        assert!(!Feedback::new(Vec::new()).is_solved());
    }

    #[test]
    fn feedback_display_and_emoji() {
        let feedback: Feedback = "🟩🟨⬜".parse().unwrap();
        assert_eq!(feedback.to_string(), "EYG");
        assert_eq!(feedback.to_emoji(), "🟩🟨⬜");
    }

    #[test]
    fn rules_from_name() {
        assert_eq!(Rules::from_name("simple"), Some(Rules::Simple));
        assert_eq!(Rules::from_name("exact"), Some(Rules::DuplicateAware));
        assert_eq!(Rules::from_name("bogus"), None);
        assert_eq!(Rules::default(), Rules::Simple);
    }
}

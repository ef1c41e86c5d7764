//! Accumulated knowledge from guess/feedback rounds
//!
//! The store keeps per-position and global letter constraints and the set of
//! dictionary words still consistent with them. Each [`KnowledgeStore::update`]
//! derives every new constraint from one guess/feedback pair first, then
//! replaces the candidate set with the words that satisfy all of them.

use crate::core::{Alphabet, Feedback, Mark, Rules, ValidationError, Word};
use crate::wordlists::Dictionary;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;

/// What is known about one position of the secret word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionConstraint {
    fixed: Option<char>,
    allowed: BTreeSet<char>,
}

impl PositionConstraint {
    fn open(alphabet: &Alphabet) -> Self {
        Self {
            fixed: None,
            allowed: alphabet.clone(),
        }
    }

    fn fix(&mut self, letter: char) {
        self.fixed = Some(letter);
        self.allowed = BTreeSet::from([letter]);
    }

    /// The required letter, once the position is solved
    #[inline]
    #[must_use]
    pub const fn fixed(&self) -> Option<char> {
        self.fixed
    }

    /// Letters still possible here
    #[inline]
    #[must_use]
    pub const fn allowed(&self) -> &BTreeSet<char> {
        &self.allowed
    }

    #[must_use]
    pub fn permits(&self, letter: char) -> bool {
        self.fixed.is_none_or(|f| f == letter) && self.allowed.contains(&letter)
    }
}

/// Knowledge gathered during one solving session
///
/// Owned by a single session; `Clone` is used for undo snapshots.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    word_length: usize,
    rules: Rules,
    candidates: BTreeSet<Word>,
    positions: Vec<PositionConstraint>,
    required: BTreeSet<char>,
    excluded: BTreeSet<char>,
    remaining: BTreeSet<char>,
    // Occurrence bounds, only tracked under `Rules::DuplicateAware`
    min_counts: BTreeMap<char, usize>,
    max_counts: BTreeMap<char, usize>,
}

impl KnowledgeStore {
    /// Start a session over `dictionary`, keeping only words of `word_length`
    ///
    /// Every position allows the whole alphabet and no letter is known yet.
    pub fn new<'a>(
        word_length: usize,
        dictionary: impl IntoIterator<Item = &'a Word>,
        alphabet: &Alphabet,
    ) -> Self {
        let candidates: BTreeSet<Word> = dictionary
            .into_iter()
            .filter(|w| w.len() == word_length)
            .cloned()
            .collect();

        Self {
            word_length,
            rules: Rules::Simple,
            candidates,
            positions: vec![PositionConstraint::open(alphabet); word_length],
            required: BTreeSet::new(),
            excluded: BTreeSet::new(),
            remaining: alphabet.clone(),
            min_counts: BTreeMap::new(),
            max_counts: BTreeMap::new(),
        }
    }

    /// Start a session over a loaded dictionary
    #[must_use]
    pub fn from_dictionary(dictionary: &Dictionary, rules: Rules) -> Self {
        Self::new(
            dictionary.word_length(),
            dictionary.words(),
            dictionary.alphabet(),
        )
        .with_rules(rules)
    }

    /// Choose how `Absent` marks on repeated letters are interpreted
    #[must_use]
    pub const fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Narrow the knowledge with one guess and its feedback
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the guess or the feedback does not have
    /// `word_length` letters. Nothing is changed in that case.
    ///
    /// # Examples
    /// ```
    /// use wordle_frequency::core::{Word, alphabet_of};
    /// use wordle_frequency::solver::KnowledgeStore;
    ///
    /// let words: Vec<Word> = ["crane", "slate", "irate"]
    ///     .iter()
    ///     .map(|w| Word::new(w).unwrap())
    ///     .collect();
    /// let mut store = KnowledgeStore::new(5, &words, &alphabet_of(&words));
    ///
    /// store
    ///     .update(&Word::new("crane").unwrap(), &"GEEGE".parse().unwrap())
    ///     .unwrap();
    /// assert_eq!(store.candidate_count(), 1); // irate
    /// ```
    pub fn update(&mut self, guess: &Word, feedback: &Feedback) -> Result<(), ValidationError> {
        if guess.len() != self.word_length {
            return Err(ValidationError::GuessLength {
                expected: self.word_length,
                actual: guess.len(),
            });
        }
        if feedback.len() != self.word_length {
            return Err(ValidationError::FeedbackLength {
                expected: self.word_length,
                actual: feedback.len(),
            });
        }

        let before = self.candidates.len();

        match self.rules {
            Rules::Simple => self.absorb_simple(guess, feedback),
            Rules::DuplicateAware => self.absorb_duplicate_aware(guess, feedback),
        }
        self.narrow_positions(guess, feedback);

        self.candidates = self
            .candidates
            .iter()
            .filter(|w| self.admits(w))
            .cloned()
            .collect();

        log::debug!(
            "{guess} {feedback}: {before} -> {} candidates",
            self.candidates.len()
        );
        Ok(())
    }

    /// Parse and apply a typed guess and feedback
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a malformed word, an unknown feedback symbol
    /// or a length mismatch.
    pub fn update_from_str(&mut self, guess: &str, feedback: &str) -> Result<(), ValidationError> {
        let guess = Word::new(guess)?;
        let feedback: Feedback = feedback.parse()?;
        self.update(&guess, &feedback)
    }

    // An absent letter is excluded everywhere, even when the same guess
    // shows it as exact or present at another position.
    fn absorb_simple(&mut self, guess: &Word, feedback: &Feedback) {
        let mut absent = BTreeSet::new();
        for (&letter, &mark) in guess.letters().iter().zip(feedback.marks()) {
            if mark.is_hit() {
                self.required.insert(letter);
            } else {
                absent.insert(letter);
            }
        }
        self.exclude(&absent);
    }

    fn absorb_duplicate_aware(&mut self, guess: &Word, feedback: &Feedback) {
        let mut hits: BTreeMap<char, usize> = BTreeMap::new();
        let mut absent = BTreeSet::new();
        for (&letter, &mark) in guess.letters().iter().zip(feedback.marks()) {
            if mark.is_hit() {
                *hits.entry(letter).or_insert(0) += 1;
            } else {
                absent.insert(letter);
            }
        }

        for (&letter, &count) in &hits {
            self.required.insert(letter);
            let min = self.min_counts.entry(letter).or_insert(0);
            *min = (*min).max(count);
        }

        // Absent next to a hit means "no more copies than the hits"
        absent.retain(|letter| match hits.get(letter) {
            Some(&count) => {
                let max = self.max_counts.entry(*letter).or_insert(count);
                *max = (*max).min(count);
                false
            }
            None => true,
        });
        self.exclude(&absent);
    }

    fn exclude(&mut self, letters: &BTreeSet<char>) {
        if letters.is_empty() {
            return;
        }
        self.remaining.retain(|c| !letters.contains(c));
        self.excluded.extend(letters);
        for position in &mut self.positions {
            position.allowed.retain(|c| !letters.contains(c));
        }
    }

    fn narrow_positions(&mut self, guess: &Word, feedback: &Feedback) {
        for ((position, &letter), &mark) in self
            .positions
            .iter_mut()
            .zip(guess.letters())
            .zip(feedback.marks())
        {
            match mark {
                Mark::Exact => position.fix(letter),
                Mark::Present | Mark::Absent => {
                    position.allowed.remove(&letter);
                }
            }
        }
    }

    /// Whether `word` satisfies every constraint gathered so far
    #[must_use]
    pub fn admits(&self, word: &Word) -> bool {
        word.len() == self.word_length
            && self
                .positions
                .iter()
                .zip(word.letters())
                .all(|(position, &letter)| position.permits(letter))
            && self.required.iter().all(|&c| word.has_letter(c))
            && !self.excluded.iter().any(|&c| word.has_letter(c))
            && self.min_counts.iter().all(|(&c, &n)| word.count_of(c) >= n)
            && self.max_counts.iter().all(|(&c, &n)| word.count_of(c) <= n)
    }

    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[inline]
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Words still consistent with all feedback, in lexicographic order
    #[inline]
    #[must_use]
    pub const fn candidates(&self) -> &BTreeSet<Word> {
        &self.candidates
    }

    #[inline]
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_candidate(&self, word: &Word) -> bool {
        self.candidates.contains(word)
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[PositionConstraint] {
        &self.positions
    }

    /// Letters known to occur somewhere
    #[inline]
    #[must_use]
    pub const fn required(&self) -> &BTreeSet<char> {
        &self.required
    }

    /// Letters ruled out everywhere
    #[inline]
    #[must_use]
    pub const fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    /// Alphabet minus excluded letters, for display only
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> &BTreeSet<char> {
        &self.remaining
    }

    /// Solved positions and their letters
    #[must_use]
    pub fn fixed_letters(&self) -> BTreeMap<usize, char> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.fixed.map(|c| (i, c)))
            .collect()
    }

    /// Write a human-readable snapshot of the knowledge to `out`
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the sink.
    pub fn describe<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

fn letters(set: &BTreeSet<char>) -> String {
    let joined: Vec<String> = set.iter().map(char::to_string).collect();
    format!("[{}]", joined.join(", "))
}

fn counts(map: &BTreeMap<char, usize>) -> String {
    let joined: Vec<String> = map.iter().map(|(c, n)| format!("{c}: {n}")).collect();
    format!("{{{}}}", joined.join(", "))
}

/// Candidate lists are printed in full below this size
pub const LIST_CANDIDATES_BELOW: usize = 10;

impl fmt::Display for KnowledgeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Remaining: {}", letters(&self.remaining))?;
        writeln!(f, "Required:  {}", letters(&self.required))?;
        writeln!(f, "Excluded:  {}", letters(&self.excluded))?;

        let fixed: Vec<String> = self
            .fixed_letters()
            .iter()
            .map(|(i, c)| format!("{}: {c}", i + 1))
            .collect();
        writeln!(f, "Fixed:     {{{}}}", fixed.join(", "))?;

        if !self.min_counts.is_empty() || !self.max_counts.is_empty() {
            writeln!(
                f,
                "Counts:    at least {}, at most {}",
                counts(&self.min_counts),
                counts(&self.max_counts)
            )?;
        }

        for (i, position) in self.positions.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, letters(&position.allowed))?;
        }

        writeln!(f, "Possibilities: {}", self.candidates.len())?;
        if self.candidates.len() < LIST_CANDIDATES_BELOW {
            let words: Vec<&str> = self.candidates.iter().map(Word::text).collect();
            writeln!(f, "[{}]", words.join(", "))?;
        }
        Ok(())
    }
}

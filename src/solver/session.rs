//! One solving session from first guess to solved or abandoned
//!
//! A session owns its [`KnowledgeStore`] and asks a [`Guesser`] for each guess
//! and an [`Oracle`] for the feedback. Either side can be the engine or a human.

use super::knowledge::KnowledgeStore;
use super::suggestion::{NoCandidatesError, suggest};
use crate::core::{Alphabet, Feedback, Rules, ValidationError, Word};
use std::fmt;
use std::time::{Duration, Instant};

/// Why a session could not continue
#[derive(Debug)]
pub enum SessionError {
    /// The engine had nothing left to suggest
    NoCandidates(NoCandidatesError),
    /// Guess or feedback did not fit the session
    Validation(ValidationError),
    /// The human asked to stop
    Abandoned,
    /// Reading or writing the console failed
    Io(std::io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidates(e) => write!(f, "{e}"),
            Self::Validation(e) => write!(f, "{e}"),
            Self::Abandoned => write!(f, "Session abandoned"),
            Self::Io(e) => write!(f, "Console error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoCandidates(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Abandoned => None,
        }
    }
}

impl From<NoCandidatesError> for SessionError {
    fn from(e: NoCandidatesError) -> Self {
        Self::NoCandidates(e)
    }
}

impl From<ValidationError> for SessionError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Source of guesses
pub trait Guesser {
    /// Produce the next guess given what is known so far
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` when no guess can be produced.
    fn next_guess(&mut self, store: &KnowledgeStore) -> Result<Word, SessionError>;
}

/// Source of feedback for a guess
pub trait Oracle {
    /// Judge `guess`; the feedback must have one mark per letter
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` when no feedback can be obtained.
    fn feedback(&mut self, guess: &Word) -> Result<Feedback, SessionError>;
}

/// The suggestion engine as a guesser
pub struct FrequencyGuesser<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> FrequencyGuesser<'a> {
    #[must_use]
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }
}

impl Guesser for FrequencyGuesser<'_> {
    fn next_guess(&mut self, store: &KnowledgeStore) -> Result<Word, SessionError> {
        Ok(suggest(self.alphabet, store.candidates())?.clone())
    }
}

/// Scores guesses against a known target word
pub struct TargetOracle {
    target: Word,
    rules: Rules,
}

impl TargetOracle {
    #[must_use]
    pub const fn new(target: Word, rules: Rules) -> Self {
        Self { target, rules }
    }
}

impl Oracle for TargetOracle {
    fn feedback(&mut self, guess: &Word) -> Result<Feedback, SessionError> {
        if guess.len() != self.target.len() {
            return Err(ValidationError::GuessLength {
                expected: self.target.len(),
                actual: guess.len(),
            }
            .into());
        }
        Ok(Feedback::score(guess, &self.target, self.rules))
    }
}

/// Session settings taken from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub word_length: usize,
    pub rules: Rules,
    /// Stop after this many rounds; `None` plays until solved or exhausted
    pub max_rounds: Option<usize>,
}

impl SessionConfig {
    #[must_use]
    pub const fn new(word_length: usize) -> Self {
        Self {
            word_length,
            rules: Rules::Simple,
            max_rounds: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

/// A single guess and what it did to the candidate set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub guess: Word,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    /// No candidates left to suggest
    Exhausted,
    /// Round cap reached
    RoundLimit,
    Abandoned,
}

/// Summary of a finished session
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub outcome: Outcome,
    pub rounds: Vec<Round>,
    pub elapsed: Duration,
    pub remaining_candidates: usize,
}

impl SessionReport {
    #[must_use]
    pub fn solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    /// Number of guesses made
    #[must_use]
    pub fn tries(&self) -> usize {
        self.rounds.len()
    }
}

/// State of a session in progress
#[derive(Debug, Clone)]
pub struct Session {
    store: KnowledgeStore,
    rounds: Vec<Round>,
    started: Instant,
}

impl Session {
    #[must_use]
    pub fn new(store: KnowledgeStore) -> Self {
        Self {
            store,
            rounds: Vec::new(),
            started: Instant::now(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.rounds.last().is_some_and(|r| r.feedback.is_solved())
    }

    /// Feed one guess and its feedback into the knowledge store
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if either does not match the word length.
    pub fn record(&mut self, guess: Word, feedback: Feedback) -> Result<&Round, ValidationError> {
        let candidates_before = self.store.candidate_count();
        self.store.update(&guess, &feedback)?;

        self.rounds.push(Round {
            guess,
            feedback,
            candidates_before,
            candidates_after: self.store.candidate_count(),
        });
        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// Ask for one guess, get its feedback and record it
    ///
    /// # Errors
    ///
    /// Propagates the guesser's and oracle's errors and any validation error.
    pub fn play_round<G: Guesser, O: Oracle>(
        &mut self,
        guesser: &mut G,
        oracle: &mut O,
    ) -> Result<&Round, SessionError> {
        let guess = guesser.next_guess(&self.store)?;
        let feedback = oracle.feedback(&guess)?;
        Ok(self.record(guess, feedback)?)
    }

    /// Play until solved, exhausted, abandoned or out of rounds
    ///
    /// # Errors
    ///
    /// Returns validation and console errors; running out of candidates and
    /// the human quitting are reported as outcomes instead.
    pub fn run<G: Guesser, O: Oracle>(
        self,
        guesser: &mut G,
        oracle: &mut O,
        max_rounds: Option<usize>,
    ) -> Result<SessionReport, SessionError> {
        self.run_observed(guesser, oracle, max_rounds, |_, _| {})
    }

    /// Like [`Session::run`], calling `on_round` after every round
    ///
    /// # Errors
    ///
    /// Same as [`Session::run`].
    pub fn run_observed<G, O, F>(
        mut self,
        guesser: &mut G,
        oracle: &mut O,
        max_rounds: Option<usize>,
        mut on_round: F,
    ) -> Result<SessionReport, SessionError>
    where
        G: Guesser,
        O: Oracle,
        F: FnMut(&Round, &KnowledgeStore),
    {
        log::debug!(
            "Session started with {} candidates",
            self.store.candidate_count()
        );

        let outcome = loop {
            if max_rounds.is_some_and(|max| self.rounds.len() >= max) {
                break Outcome::RoundLimit;
            }

            match self.play_round(guesser, oracle).map(|_| ()) {
                Ok(()) => {
                    let round = &self.rounds[self.rounds.len() - 1];
                    on_round(round, &self.store);
                    if round.feedback.is_solved() {
                        break Outcome::Solved;
                    }
                }
                Err(SessionError::NoCandidates(_)) => break Outcome::Exhausted,
                Err(SessionError::Abandoned) => break Outcome::Abandoned,
                Err(e) => return Err(e),
            }
        };

        let elapsed = self.started.elapsed();
        log::info!(
            "Session {outcome:?} after {} rounds in {elapsed:?}",
            self.rounds.len()
        );

        Ok(SessionReport {
            outcome,
            remaining_candidates: self.store.candidate_count(),
            rounds: self.rounds,
            elapsed,
        })
    }
}

/// Self-test: let the engine solve `target` from a fresh store
///
/// # Errors
///
/// Returns `ValidationError` if the target does not have the store's word length.
pub fn solve_locally(
    store: KnowledgeStore,
    alphabet: &Alphabet,
    target: &Word,
    max_rounds: Option<usize>,
) -> Result<SessionReport, SessionError> {
    if target.len() != store.word_length() {
        return Err(ValidationError::GuessLength {
            expected: store.word_length(),
            actual: target.len(),
        }
        .into());
    }

    let rules = store.rules();
    Session::new(store).run(
        &mut FrequencyGuesser::new(alphabet),
        &mut TargetOracle::new(target.clone(), rules),
        max_rounds,
    )
}

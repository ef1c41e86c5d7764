//! Wordle solving
//!
//! The knowledge store narrows the candidate set from feedback, the
//! suggestion engine picks the next guess and sessions tie the two together.

mod knowledge;
mod session;
mod suggestion;

pub use knowledge::{KnowledgeStore, LIST_CANDIDATES_BELOW, PositionConstraint};
pub use session::{
    FrequencyGuesser, Guesser, Oracle, Outcome, Round, Session, SessionConfig, SessionError,
    SessionReport, TargetOracle, solve_locally,
};
pub use suggestion::{
    NoCandidatesError, Scored, coverage, letter_occurrences, rank, suggest, suggest_scored,
};

//! Word solving command
//!
//! Lets the engine solve a target word from the dictionary and records the path.

use crate::core::Word;
use crate::solver::{FrequencyGuesser, KnowledgeStore, Session, SessionConfig, SessionReport, TargetOracle};
use crate::wordlists::Dictionary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Configuration for solving a word
pub struct SolveConfig {
    /// Target word; a random dictionary word when `None`
    pub target: Option<String>,
    pub session: SessionConfig,
    pub seed: Option<u64>,
    /// Keep a knowledge snapshot after every round
    pub snapshots: bool,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: Option<String>, session: SessionConfig) -> Self {
        Self {
            target,
            session,
            seed: None,
            snapshots: false,
        }
    }
}

/// Result of solving a word
pub struct SolveResult {
    pub target: Word,
    pub report: SessionReport,
    /// Knowledge after each round, empty unless requested
    pub snapshots: Vec<String>,
}

/// Pick a random dictionary word, reproducibly when `seed` is given
#[must_use]
pub fn random_target(dictionary: &Dictionary, seed: Option<u64>) -> Option<&Word> {
    let mut rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
    dictionary.words().choose(&mut rng)
}

/// Solve a target word with the frequency engine
///
/// # Errors
///
/// Returns an error if:
/// - The target is not a dictionary word of the session's length
/// - A round fails validation
pub fn solve_word(config: &SolveConfig, dictionary: &Dictionary) -> Result<SolveResult, String> {
    let target = match &config.target {
        Some(text) => dictionary.get(text).ok_or_else(|| {
            format!(
                "'{text}' is not a {}-letter word in the dictionary",
                dictionary.word_length()
            )
        })?,
        None => random_target(dictionary, config.seed).ok_or("Dictionary is empty")?,
    }
    .clone();

    let rules = config.session.rules;
    let store = KnowledgeStore::from_dictionary(dictionary, rules);
    let mut snapshots = Vec::new();

    let report = Session::new(store)
        .run_observed(
            &mut FrequencyGuesser::new(dictionary.alphabet()),
            &mut TargetOracle::new(target.clone(), rules),
            config.session.max_rounds,
            |_, store| {
                if config.snapshots {
                    snapshots.push(store.to_string());
                }
            },
        )
        .map_err(|e| e.to_string())?;

    Ok(SolveResult {
        target,
        report,
        snapshots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rules;
    use crate::solver::Outcome;
    use crate::wordlists::{DictionarySource, Language};

    fn english() -> Dictionary {
        Dictionary::load(&DictionarySource::Embedded(Language::English), Language::English, 5)
            .unwrap()
    }

    #[test]
    fn solve_word_succeeds() {
        let dictionary = english();
        let config = SolveConfig::new(Some("crane".to_string()), SessionConfig::default());

        let result = solve_word(&config, &dictionary).unwrap();

        assert!(result.report.solved());
        assert_eq!(result.target.text(), "crane");
        assert_eq!(result.report.rounds.last().unwrap().guess.text(), "crane");
        assert!(result.snapshots.is_empty());
    }

    #[test]
    fn solve_records_history() {
        let dictionary = english();
        let config = SolveConfig::new(Some("apple".to_string()), SessionConfig::default());

        let result = solve_word(&config, &dictionary).unwrap();

        assert!(!result.report.rounds.is_empty());
        for round in &result.report.rounds {
            assert!(round.candidates_after <= round.candidates_before);
        }
    }

    #[test]
    fn solve_invalid_target_returns_error() {
        let dictionary = english();
        let config = SolveConfig::new(Some("zzzzz".to_string()), SessionConfig::default());
        assert!(solve_word(&config, &dictionary).is_err());

        let config = SolveConfig::new(Some("cranes".to_string()), SessionConfig::default());
        assert!(solve_word(&config, &dictionary).is_err());
    }

    #[test]
    fn solve_with_round_limit() {
        let dictionary = english();
        let mut session = SessionConfig::default();
        session.max_rounds = Some(1);
        let config = SolveConfig::new(Some("ankle".to_string()), session);

        let result = solve_word(&config, &dictionary).unwrap();

        assert_eq!(result.report.tries(), 1);
        assert!(matches!(
            result.report.outcome,
            Outcome::Solved | Outcome::RoundLimit
        ));
    }

    #[test]
    fn snapshots_follow_rounds() {
        let dictionary = english();
        let mut config = SolveConfig::new(Some("angle".to_string()), SessionConfig::default());
        config.snapshots = true;
        config.session.rules = Rules::DuplicateAware;

        let result = solve_word(&config, &dictionary).unwrap();

        assert_eq!(result.snapshots.len(), result.report.tries());
        assert!(result.snapshots.last().unwrap().contains("Possibilities: 1"));
    }

    #[test]
    fn seeded_random_target_is_reproducible() {
        let dictionary = english();
        let first = random_target(&dictionary, Some(7)).unwrap();
        let second = random_target(&dictionary, Some(7)).unwrap();
        assert_eq!(first, second);

        let mut config = SolveConfig::new(None, SessionConfig::default());
        config.seed = Some(7);
        let result = solve_word(&config, &dictionary).unwrap();
        assert_eq!(&result.target, first);
        assert!(result.report.solved());
    }
}

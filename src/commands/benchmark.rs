//! Benchmark command
//!
//! Solves a random sample of dictionary words in parallel and reports timing.

use crate::core::Word;
use crate::solver::{KnowledgeStore, SessionConfig, solve_locally};
use crate::wordlists::Dictionary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_words: usize,
    pub solved: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Guess count -> number of solved words
    pub distribution: BTreeMap<usize, usize>,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Draw `count` distinct targets from the dictionary
///
/// The whole dictionary is returned if it has fewer than `count` words.
#[must_use]
pub fn sample_targets(dictionary: &Dictionary, count: usize, seed: Option<u64>) -> Vec<&Word> {
    let mut rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
    let mut targets: Vec<&Word> = dictionary.words().choose_multiple(&mut rng, count).collect();
    targets.sort();
    targets
}

/// Run one independent session per target, in parallel
pub fn run_benchmark(
    dictionary: &Dictionary,
    targets: &[&Word],
    config: SessionConfig,
) -> BenchmarkResult {
    let start = Instant::now();

    let tries: Vec<Option<usize>> = targets
        .par_iter()
        .map(|&target| {
            let store = KnowledgeStore::from_dictionary(dictionary, config.rules);
            match solve_locally(store, dictionary.alphabet(), target, config.max_rounds) {
                Ok(report) if report.solved() => Some(report.tries()),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Session for {target} failed: {e}");
                    None
                }
            }
        })
        .collect();

    let duration = start.elapsed();
    let solved: Vec<usize> = tries.into_iter().flatten().collect();

    let mut distribution = BTreeMap::new();
    for &n in &solved {
        *distribution.entry(n).or_insert(0) += 1;
    }

    let total_words = targets.len();
    let total_guesses: usize = solved.iter().sum();

    BenchmarkResult {
        total_words,
        solved: solved.len(),
        total_guesses,
        average_guesses: if solved.is_empty() {
            0.0
        } else {
            total_guesses as f64 / solved.len() as f64
        },
        min_guesses: solved.iter().copied().min().unwrap_or(0),
        max_guesses: solved.iter().copied().max().unwrap_or(0),
        distribution,
        duration,
        words_per_second: total_words as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{DictionarySource, Language};

    fn english() -> Dictionary {
        Dictionary::load(&DictionarySource::Embedded(Language::English), Language::English, 5)
            .unwrap()
    }

    #[test]
    fn benchmark_runs() {
        let dictionary = english();
        let targets = sample_targets(&dictionary, 10, Some(1));
        let result = run_benchmark(&dictionary, &targets, SessionConfig::default());

        assert_eq!(result.total_words, 10);
        assert_eq!(result.solved, 10);
        assert!(result.total_guesses > 0);
        assert!(result.average_guesses >= 1.0);
        assert!(result.min_guesses >= 1);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let dictionary = english();
        let targets = sample_targets(&dictionary, 20, Some(2));
        let result = run_benchmark(&dictionary, &targets, SessionConfig::default());

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.solved);
    }

    #[test]
    fn benchmark_empty_target_list() {
        let dictionary = english();
        let result = run_benchmark(&dictionary, &[], SessionConfig::default());

        assert_eq!(result.total_words, 0);
        assert_eq!(result.total_guesses, 0);
        assert!(result.distribution.is_empty());
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let dictionary = english();
        let targets = sample_targets(&dictionary, 15, Some(3));
        let result = run_benchmark(&dictionary, &targets, SessionConfig::default());

        assert!(result.average_guesses >= result.min_guesses as f64);
        assert!(result.average_guesses <= result.max_guesses as f64);
    }

    #[test]
    fn round_cap_counts_as_failure() {
        let dictionary = english();
        let targets = sample_targets(&dictionary, 15, Some(4));
        let mut config = SessionConfig::default();
        config.max_rounds = Some(1);

        let result = run_benchmark(&dictionary, &targets, config);
        assert!(result.solved < result.total_words);
        assert!(result.distribution.keys().all(|&n| n == 1));
    }

    #[test]
    fn sample_is_seeded_distinct_and_capped() {
        let dictionary = english();
        let a = sample_targets(&dictionary, 25, Some(9));
        let b = sample_targets(&dictionary, 25, Some(9));
        assert_eq!(a, b);

        let mut unique = a.clone();
        unique.dedup();
        assert_eq!(unique.len(), 25);

        let all = sample_targets(&dictionary, dictionary.len() + 10, None);
        assert_eq!(all.len(), dictionary.len());
    }
}

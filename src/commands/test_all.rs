//! Test all words - comprehensive solver evaluation
//!
//! Runs the engine against every dictionary word and generates statistics.

use crate::core::Word;
use crate::output::formatters::guesses_word;
use crate::solver::{KnowledgeStore, Outcome, SessionConfig, solve_locally};
use crate::wordlists::Dictionary;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Result from testing a single word
#[derive(Debug, Clone)]
pub struct WordTestResult {
    pub word: String,
    pub guesses: Vec<String>,
    pub outcome: Outcome,
    pub duration: Duration,
}

impl WordTestResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.outcome == Outcome::Solved
    }
}

/// Statistics from testing all words
#[derive(Debug)]
pub struct TestAllStatistics {
    pub total_words: usize,
    pub solved: usize,
    pub failed: usize,
    pub guess_distribution: BTreeMap<usize, usize>,
    pub total_time: Duration,
    pub average_guesses: f64,
    pub max_guesses: usize,
    pub min_guesses: usize,
    pub best_word: Option<(String, usize)>,
    /// Solved words that took the most guesses, hardest first
    pub worst_words: Vec<(String, usize)>,
    pub failed_words: Vec<String>,
    pub first_guess_used: HashMap<String, usize>,
}

/// Number of hardest words kept in the statistics
const HARDEST_KEPT: usize = 10;

fn test_word(dictionary: &Dictionary, target: &Word, config: SessionConfig) -> WordTestResult {
    let start = Instant::now();
    let store = KnowledgeStore::from_dictionary(dictionary, config.rules);

    let (guesses, outcome) =
        match solve_locally(store, dictionary.alphabet(), target, config.max_rounds) {
            Ok(report) => (
                report
                    .rounds
                    .iter()
                    .map(|r| r.guess.text().to_string())
                    .collect(),
                report.outcome,
            ),
            Err(e) => {
                log::warn!("Session for {target} failed: {e}");
                (Vec::new(), Outcome::Exhausted)
            }
        };

    WordTestResult {
        word: target.text().to_string(),
        guesses,
        outcome,
        duration: start.elapsed(),
    }
}

/// Run the engine on every dictionary word (or the first `limit` words)
///
/// # Panics
///
/// Panics if the built-in progress bar template is malformed.
pub fn run_test_all(
    dictionary: &Dictionary,
    limit: Option<usize>,
    config: SessionConfig,
) -> TestAllStatistics {
    let test_words: Vec<&Word> = dictionary
        .words()
        .iter()
        .take(limit.unwrap_or(dictionary.len()))
        .collect();

    println!("🎯 Testing {} words...", test_words.len());

    let pb = ProgressBar::new(test_words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .expect("valid progress template")
            .progress_chars("█▓▒░"),
    );

    let total_start = Instant::now();

    let results: Vec<WordTestResult> = test_words
        .par_iter()
        .map(|&target| {
            let result = test_word(dictionary, target, config);
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_with_message("Complete!");

    summarize(&results, total_start.elapsed())
}

/// Aggregate per-word results into statistics
#[must_use]
pub fn summarize(results: &[WordTestResult], total_time: Duration) -> TestAllStatistics {
    let mut guess_distribution = BTreeMap::new();
    let mut first_guess_used: HashMap<String, usize> = HashMap::new();

    for result in results {
        if let Some(first) = result.guesses.first() {
            *first_guess_used.entry(first.clone()).or_insert(0) += 1;
        }
        if result.success() {
            *guess_distribution.entry(result.guesses.len()).or_insert(0) += 1;
        }
    }

    let solved: Vec<&WordTestResult> = results.iter().filter(|r| r.success()).collect();
    let total_guesses: usize = solved.iter().map(|r| r.guesses.len()).sum();

    let average_guesses = if solved.is_empty() {
        0.0
    } else {
        total_guesses as f64 / solved.len() as f64
    };

    let best_word = solved
        .iter()
        .min_by_key(|r| r.guesses.len())
        .map(|r| (r.word.clone(), r.guesses.len()));

    let mut worst_words: Vec<(String, usize)> = solved
        .iter()
        .map(|r| (r.word.clone(), r.guesses.len()))
        .collect();
    // Stable, so equally hard words stay in dictionary order
    worst_words.sort_by_key(|(_, n)| Reverse(*n));
    worst_words.truncate(HARDEST_KEPT);

    let failed_words: Vec<String> = results
        .iter()
        .filter(|r| !r.success())
        .map(|r| r.word.clone())
        .collect();

    TestAllStatistics {
        total_words: results.len(),
        solved: solved.len(),
        failed: failed_words.len(),
        guess_distribution,
        total_time,
        average_guesses,
        max_guesses: solved.iter().map(|r| r.guesses.len()).max().unwrap_or(0),
        min_guesses: solved.iter().map(|r| r.guesses.len()).min().unwrap_or(0),
        best_word,
        worst_words,
        failed_words,
        first_guess_used,
    }
}

/// Print test-all statistics
pub fn print_test_all_statistics(stats: &TestAllStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Test Results ");
    println!("{}", "═".repeat(70));

    let total = stats.total_words.max(1) as f64;

    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Total words tested:  {}", stats.total_words);
    println!(
        "  Successfully solved: {} {}",
        stats.solved,
        format!("({:.1}%)", stats.solved as f64 / total * 100.0).green()
    );
    if stats.failed > 0 {
        println!(
            "  Failed to solve:     {} {}",
            stats.failed,
            format!("({:.1}%)", stats.failed as f64 / total * 100.0).red()
        );
    }
    println!(
        "  Average guesses:     {}",
        format!("{:.3}", stats.average_guesses).bright_yellow().bold()
    );
    println!(
        "  Total time:          {:.2}s",
        stats.total_time.as_secs_f64()
    );
    println!(
        "  Time per word:       {:.1}ms",
        stats.total_time.as_millis() as f64 / total
    );

    println!("\n📈 {}", "Guess Distribution".bright_cyan().bold());
    let max_count = stats.guess_distribution.values().copied().max().unwrap_or(1);
    for (&guesses, &count) in &stats.guess_distribution {
        let percentage = count as f64 / stats.solved.max(1) as f64 * 100.0;
        let bar_len = (count * 40 / max_count).max(usize::from(count > 0));
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        println!("  {guesses:2} {:7}: {bar} {count:4} ({percentage:5.1}%)", guesses_word(guesses));
    }

    if let Some((word, guesses)) = &stats.best_word {
        println!("\n✨ {}", "Best Performance".green().bold());
        println!(
            "  {} solved in {} {}",
            word.to_uppercase().bright_green(),
            guesses,
            guesses_word(*guesses)
        );
    }

    if !stats.worst_words.is_empty() {
        println!("\n😰 {}", "Hardest Words".yellow().bold());
        for (word, guesses) in stats.worst_words.iter().take(5) {
            println!("  {} ({guesses} guesses)", word.to_uppercase().yellow());
        }
    }

    if !stats.failed_words.is_empty() {
        println!("\n❌ {}", "Unsolved".red().bold());
        for word in stats.failed_words.iter().take(10) {
            println!("  {}", word.to_uppercase().red());
        }
    }

    println!("\n🎯 First Guess Usage");
    let mut first_guesses: Vec<(&String, &usize)> = stats.first_guess_used.iter().collect();
    first_guesses.sort_by_key(|(word, count)| (Reverse(**count), (*word).clone()));

    for (word, count) in first_guesses.iter().take(5) {
        let percentage = **count as f64 / total * 100.0;
        println!(
            "  {}: {count} times ({percentage:.1}%)",
            word.to_uppercase()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rules;
    use crate::wordlists::{DictionarySource, Language};

    fn result(word: &str, guesses: &[&str], outcome: Outcome) -> WordTestResult {
        WordTestResult {
            word: word.to_string(),
            guesses: guesses.iter().map(ToString::to_string).collect(),
            outcome,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn summarize_counts_outcomes() {
        let results = [
            result("crane", &["slate", "crane"], Outcome::Solved),
            result("slate", &["slate"], Outcome::Solved),
            result("irate", &["slate", "crane", "grate", "irate"], Outcome::Solved),
            result("plate", &["slate"], Outcome::RoundLimit),
        ];
        let stats = summarize(&results, Duration::from_secs(1));

        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.solved, 3);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.failed_words, ["plate"]);
        assert_eq!(stats.min_guesses, 1);
        assert_eq!(stats.max_guesses, 4);
        assert!((stats.average_guesses - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.best_word, Some(("slate".to_string(), 1)));
        assert_eq!(stats.worst_words[0], ("irate".to_string(), 4));
        assert_eq!(stats.first_guess_used["slate"], 4);
        assert_eq!(stats.guess_distribution.values().sum::<usize>(), 3);
    }

    #[test]
    fn summarize_nothing() {
        let stats = summarize(&[], Duration::ZERO);
        assert_eq!(stats.total_words, 0);
        assert!((stats.average_guesses - 0.0).abs() < f64::EPSILON);
        assert!(stats.best_word.is_none());
    }

    #[test]
    fn run_test_all_solves_limited_subset() {
        let dictionary =
            Dictionary::load(&DictionarySource::Embedded(Language::English), Language::English, 5)
                .unwrap();
        let mut config = SessionConfig::default();
        config.rules = Rules::DuplicateAware;

        let stats = run_test_all(&dictionary, Some(30), config);

        assert_eq!(stats.total_words, 30);
        assert_eq!(stats.solved, 30);
        assert_eq!(stats.first_guess_used.len(), 1);
    }
}

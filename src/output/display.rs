//! Display functions for command results

use super::formatters::{create_progress_bar, guesses_word, tiles};
use crate::commands::{BenchmarkResult, SolveResult};
use crate::solver::Outcome;
use colored::Colorize;

/// Print the result of solving a word
///
/// Knowledge snapshots are printed after each round when the result has them.
pub fn print_solve_result(result: &SolveResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.target.text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, round) in result.report.rounds.iter().enumerate() {
        println!(
            "\nTurn {}: {}  {} {}",
            i + 1,
            tiles(&round.guess, &round.feedback),
            round.feedback.to_emoji(),
            format!(
                "{} → {} candidates",
                round.candidates_before, round.candidates_after
            )
            .bright_black()
        );

        if let Some(snapshot) = result.snapshots.get(i) {
            for line in snapshot.lines() {
                println!("  {line}");
            }
        }
    }

    let tries = result.report.tries();
    println!();
    match result.report.outcome {
        Outcome::Solved => println!(
            "{}",
            format!("✅ Solved in {tries} {}!", guesses_word(tries))
                .green()
                .bold()
        ),
        Outcome::RoundLimit => println!(
            "{}",
            format!("❌ Not solved within {tries} {}", guesses_word(tries))
                .red()
                .bold()
        ),
        Outcome::Exhausted | Outcome::Abandoned => println!(
            "{}",
            format!("❌ Ran out of candidates after {tries} {}", guesses_word(tries))
                .red()
                .bold()
        ),
    }
    println!("   Time: {:.2?}", result.report.elapsed);
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!("   Solved:           {}", result.solved);
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&guess_count, &count) in &result.distribution {
        let pct = count as f64 / result.total_words.max(1) as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guess_count:2}: {} {count:4} ({pct:5.1}%)", bar.green());
    }
}

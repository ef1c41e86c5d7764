//! Formatting utilities for terminal output

use crate::core::{Feedback, Mark, Word};
use colored::{ColoredString, Colorize};

/// One guessed letter coloured like a Wordle tile
#[must_use]
pub fn tile(letter: char, mark: Mark) -> ColoredString {
    let text = format!(" {} ", letter.to_uppercase());
    match mark {
        Mark::Exact => text.black().on_green().bold(),
        Mark::Present => text.black().on_yellow().bold(),
        Mark::Absent => text.white().on_bright_black(),
    }
}

/// A guess rendered as a row of coloured tiles
#[must_use]
pub fn tiles(guess: &Word, feedback: &Feedback) -> String {
    guess
        .letters()
        .iter()
        .zip(feedback.marks())
        .map(|(&letter, &mark)| tile(letter, mark).to_string())
        .collect()
}

/// A guess followed by its feedback as emoji, e.g. `CRANE 🟩⬜⬜🟨🟩`
#[must_use]
pub fn guess_line(guess: &Word, feedback: &Feedback) -> String {
    format!("{} {}", guess.text().to_uppercase(), feedback.to_emoji())
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        // Clamped to [0, width] before the cast
        ((value / max).clamp(0.0, 1.0) * width as f64) as usize
    } else {
        0
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// "guess" or "guesses"
#[must_use]
pub const fn guesses_word(count: usize) -> &'static str {
    if count == 1 { "guess" } else { "guesses" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_line_uses_emoji() {
        let guess = Word::new("crane").unwrap();
        let feedback: Feedback = "EGGYE".parse().unwrap();
        assert_eq!(guess_line(&guess, &feedback), "CRANE 🟩⬜⬜🟨🟩");
    }

    #[test]
    fn tiles_contain_every_letter() {
        let guess = Word::new("bølge").unwrap();
        let feedback: Feedback = "EGEGE".parse().unwrap();
        let row = tiles(&guess, &feedback);
        for letter in ["B", "Ø", "L", "G", "E"] {
            assert!(row.contains(letter));
        }
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_clamps_overflow_and_zero_max() {
        assert_eq!(create_progress_bar(250.0, 100.0, 4), "████");
        assert_eq!(create_progress_bar(1.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn pluralises_guesses() {
        assert_eq!(guesses_word(1), "guess");
        assert_eq!(guesses_word(3), "guesses");
    }
}

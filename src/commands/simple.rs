//! Simple interactive CLI mode
//!
//! Line-based sessions without the TUI. Either side of the game can be the
//! engine or the person at the keyboard.

use crate::core::{Feedback, Word};
use crate::output::formatters::{guesses_word, tiles};
use crate::solver::{
    FrequencyGuesser, Guesser, KnowledgeStore, Oracle, Outcome, Round, Session, SessionConfig,
    SessionError, SessionReport, TargetOracle, suggest_scored,
};
use crate::wordlists::Dictionary;
use colored::Colorize;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Who guesses and who knows the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStyle {
    /// Engine guesses a word picked locally
    SolveLocal,
    /// Human guesses a word picked locally
    PlayLocal,
    /// Engine guesses, human types the feedback from another game
    SolveExternal,
    /// Human types both guesses and feedback; the engine only narrows
    PlayExternal,
}

impl PlayStyle {
    /// Style from the `--human` flag and whether a local target exists
    #[must_use]
    pub const fn from_flags(human_guesses: bool, local_target: bool) -> Self {
        match (human_guesses, local_target) {
            (false, true) => Self::SolveLocal,
            (true, true) => Self::PlayLocal,
            (false, false) => Self::SolveExternal,
            (true, false) => Self::PlayExternal,
        }
    }

    const fn human_guesses(self) -> bool {
        matches!(self, Self::PlayLocal | Self::PlayExternal)
    }
}

/// Prompting console over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the output.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prompt and read one trimmed line
    ///
    /// # Errors
    ///
    /// `SessionError::Abandoned` on end of input or a quit command,
    /// `SessionError::Io` if the console fails.
    pub fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::Abandoned);
        }

        let line = line.trim().to_string();
        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => Err(SessionError::Abandoned),
            _ => Ok(line),
        }
    }
}

/// Guesses typed by a human, checked against the dictionary
pub struct HumanGuesser<'a, R, W> {
    console: &'a RefCell<Console<R, W>>,
    dictionary: &'a Dictionary,
}

impl<'a, R, W> HumanGuesser<'a, R, W> {
    pub const fn new(console: &'a RefCell<Console<R, W>>, dictionary: &'a Dictionary) -> Self {
        Self {
            console,
            dictionary,
        }
    }
}

impl<R: BufRead, W: Write> Guesser for HumanGuesser<'_, R, W> {
    fn next_guess(&mut self, store: &KnowledgeStore) -> Result<Word, SessionError> {
        let mut console = self.console.borrow_mut();
        console.say(format!("{} candidates remaining", store.candidate_count()))?;

        loop {
            let text = console.ask("Your guess")?;
            if let Some(word) = self.dictionary.get(&text) {
                return Ok(word.clone());
            }
            console.say(format!(
                "'{text}' is not a {}-letter word in the dictionary",
                self.dictionary.word_length()
            ))?;
        }
    }
}

/// Feedback typed by a human, e.g. copied from another Wordle game
pub struct HumanOracle<'a, R, W> {
    console: &'a RefCell<Console<R, W>>,
}

impl<'a, R, W> HumanOracle<'a, R, W> {
    pub const fn new(console: &'a RefCell<Console<R, W>>) -> Self {
        Self { console }
    }
}

impl<R: BufRead, W: Write> Oracle for HumanOracle<'_, R, W> {
    fn feedback(&mut self, guess: &Word) -> Result<Feedback, SessionError> {
        let mut console = self.console.borrow_mut();
        console.say(format!("Guess: {}", guess.text().to_uppercase().bold()))?;

        loop {
            let input = console.ask("Feedback (E/Y/G, or 'win')")?;
            if matches!(input.to_lowercase().as_str(), "win" | "solved") {
                return Ok(Feedback::solved(guess.len()));
            }

            match input.parse::<Feedback>() {
                Ok(feedback) if feedback.len() == guess.len() => return Ok(feedback),
                Ok(feedback) => console.say(format!(
                    "Expected {} marks, got {}",
                    guess.len(),
                    feedback.len()
                ))?,
                Err(e) => console.say(e)?,
            }
        }
    }
}

fn print_banner<R: BufRead, W: Write>(console: &mut Console<R, W>, style: PlayStyle) -> io::Result<()> {
    console.say("\n╔══════════════════════════════════════════════════════════════╗")?;
    console.say("║              Wordle Solver - Interactive Mode                ║")?;
    console.say("╚══════════════════════════════════════════════════════════════╝\n")?;

    match style {
        PlayStyle::SolveLocal => console.say("Watch the engine solve a hidden word.")?,
        PlayStyle::PlayLocal => console.say("Guess the hidden word. Type 'quit' to give up.")?,
        PlayStyle::SolveExternal | PlayStyle::PlayExternal => {
            console.say("After each guess, enter the feedback:")?;
            console.say("  - E/e/🟩 for exact (correct position)")?;
            console.say("  - Y/y/🟨 for present (wrong position)")?;
            console.say("  - G/g/-/⬜ for absent (not in word)")?;
            console.say("  - or 'win' if the guess was right\n")?;
        }
    }
    Ok(())
}

fn print_round<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    round: &Round,
    number: usize,
) -> io::Result<()> {
    console.say(format!(
        "{number}. {}  {} -> {} candidates",
        tiles(&round.guess, &round.feedback),
        round.candidates_before,
        round.candidates_after
    ))
}

fn print_outcome<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    report: &SessionReport,
    target: Option<&Word>,
) -> io::Result<()> {
    let tries = report.tries();
    match report.outcome {
        Outcome::Solved => console.say(
            format!("\n🎉 Solved in {tries} {}!", guesses_word(tries))
                .green()
                .bold(),
        )?,
        Outcome::Exhausted => console.say(
            "\n❌ No candidates remain! The feedback may be inconsistent."
                .red()
                .bold(),
        )?,
        Outcome::RoundLimit => console.say(format!("\n⏱  Out of rounds after {tries}").yellow())?,
        Outcome::Abandoned => console.say("\n👋 Game abandoned")?,
    }

    if let Some(target) = target.filter(|_| !report.solved()) {
        console.say(format!("The word was {}", target.text().to_uppercase().bold()))?;
    }
    console.say(format!("Elapsed: {:.2?}", report.elapsed))
}

/// Play one session in the given style
///
/// `target` must be set for the local styles.
///
/// # Errors
///
/// Returns an error on console failure, or if a local style has no target.
pub fn play_session<R: BufRead, W: Write>(
    console: &RefCell<Console<R, W>>,
    dictionary: &Dictionary,
    config: SessionConfig,
    style: PlayStyle,
    target: Option<&Word>,
) -> Result<SessionReport, String> {
    print_banner(&mut console.borrow_mut(), style).map_err(|e| e.to_string())?;

    let session = Session::new(KnowledgeStore::from_dictionary(dictionary, config.rules));
    let mut number = 0;
    let on_round = |round: &Round, store: &KnowledgeStore| {
        number += 1;
        let mut console = console.borrow_mut();
        // Failures here surface on the next prompt
        let _ = print_round(&mut console, round, number);
        if style.human_guesses() {
            if let Ok(hint) = suggest_scored(dictionary.alphabet(), store.candidates()) {
                let _ = console.say(format!(
                    "   hint: {} (coverage {}, {} candidates)",
                    hint.word.text().to_uppercase(),
                    hint.score,
                    store.candidate_count()
                ));
            }
        }
    };

    let local = || {
        target
            .cloned()
            .map(|t| TargetOracle::new(t, config.rules))
            .ok_or_else(|| "A local game needs a target word".to_string())
    };

    let result = match style {
        PlayStyle::SolveLocal => session.run_observed(
            &mut FrequencyGuesser::new(dictionary.alphabet()),
            &mut local()?,
            config.max_rounds,
            on_round,
        ),
        PlayStyle::PlayLocal => session.run_observed(
            &mut HumanGuesser::new(console, dictionary),
            &mut local()?,
            config.max_rounds,
            on_round,
        ),
        PlayStyle::SolveExternal => session.run_observed(
            &mut FrequencyGuesser::new(dictionary.alphabet()),
            &mut HumanOracle::new(console),
            config.max_rounds,
            on_round,
        ),
        PlayStyle::PlayExternal => session.run_observed(
            &mut HumanGuesser::new(console, dictionary),
            &mut HumanOracle::new(console),
            config.max_rounds,
            on_round,
        ),
    };
    let report = result.map_err(|e| e.to_string())?;

    print_outcome(&mut console.borrow_mut(), &report, target).map_err(|e| e.to_string())?;
    Ok(report)
}

/// Run the simple interactive CLI mode on stdin/stdout
///
/// `pick_target` supplies the hidden word for local styles, once per game.
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(
    dictionary: &Dictionary,
    config: SessionConfig,
    human_guesses: bool,
    mut pick_target: impl FnMut() -> Option<Word>,
) -> Result<(), String> {
    let stdin = io::stdin();
    let console = RefCell::new(Console::new(stdin.lock(), io::stdout()));

    loop {
        let target = pick_target();
        let style = PlayStyle::from_flags(human_guesses, target.is_some());
        let report = play_session(&console, dictionary, config, style, target.as_ref())?;
        if report.outcome == Outcome::Abandoned {
            return Ok(());
        }

        let again = match console.borrow_mut().ask("Play again? (yes/no)") {
            Ok(answer) => matches!(answer.to_lowercase().as_str(), "yes" | "y"),
            Err(SessionError::Abandoned) => false,
            Err(e) => return Err(e.to_string()),
        };
        if !again {
            console
                .borrow_mut()
                .say("\n👋 Thanks for playing!\n")
                .map_err(|e| e.to_string())?;
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rules, alphabet_of};
    use std::io::Cursor;

    fn dictionary() -> Dictionary {
        let words = ["crane", "slate", "irate", "grate", "crate", "plate"]
            .iter()
            .map(|w| Word::new(w).unwrap());
        Dictionary::new(words, 5, "test").unwrap()
    }

    fn console(input: &str) -> RefCell<Console<Cursor<Vec<u8>>, Vec<u8>>> {
        RefCell::new(Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()))
    }

    fn transcript(console: RefCell<Console<Cursor<Vec<u8>>, Vec<u8>>>) -> String {
        String::from_utf8(console.into_inner().output).unwrap()
    }

    #[test]
    fn style_from_flags() {
        assert_eq!(PlayStyle::from_flags(false, true), PlayStyle::SolveLocal);
        assert_eq!(PlayStyle::from_flags(true, true), PlayStyle::PlayLocal);
        assert_eq!(PlayStyle::from_flags(false, false), PlayStyle::SolveExternal);
        assert_eq!(PlayStyle::from_flags(true, false), PlayStyle::PlayExternal);
    }

    #[test]
    fn ask_treats_quit_and_eof_as_abandon() {
        let console = console("  hello \nquit\n");
        let mut console = console.borrow_mut();
        assert_eq!(console.ask("?").unwrap(), "hello");
        assert!(matches!(console.ask("?"), Err(SessionError::Abandoned)));
        assert!(matches!(console.ask("?"), Err(SessionError::Abandoned)));
    }

    #[test]
    fn human_guesser_reprompts_until_dictionary_word() {
        let dictionary = dictionary();
        let console = console("zzzzz\ncranes\nSLATE\n");
        let store = KnowledgeStore::from_dictionary(&dictionary, Rules::Simple);

        let guess = HumanGuesser::new(&console, &dictionary)
            .next_guess(&store)
            .unwrap();

        assert_eq!(guess.text(), "slate");
        let out = transcript(console);
        assert!(out.contains("'zzzzz' is not a 5-letter word"));
        assert!(out.contains("'cranes' is not a 5-letter word"));
    }

    #[test]
    fn human_oracle_reprompts_until_valid_feedback() {
        let console = console("EXE\nEEG\nGG EYE\n");
        let guess = Word::new("crane").unwrap();

        let feedback = HumanOracle::new(&console).feedback(&guess).unwrap();

        assert_eq!(feedback.to_string(), "GGEYE");
        let out = transcript(console);
        assert!(out.contains("Unknown feedback symbol"));
        assert!(out.contains("Expected 5 marks, got 3"));
    }

    #[test]
    fn human_oracle_win_shortcut() {
        let console = console("win\n");
        let feedback = HumanOracle::new(&console)
            .feedback(&Word::new("crane").unwrap())
            .unwrap();
        assert!(feedback.is_solved());
    }

    #[test]
    fn solve_local_session() {
        let dictionary = dictionary();
        let console = console("");
        let target = Word::new("plate").unwrap();

        let report = play_session(
            &console,
            &dictionary,
            SessionConfig::default(),
            PlayStyle::SolveLocal,
            Some(&target),
        )
        .unwrap();

        assert!(report.solved());
        assert!(transcript(console).contains("Solved in"));
    }

    #[test]
    fn play_local_session() {
        let dictionary = dictionary();
        let console = console("nope\ncrane\nplate\n");
        let target = Word::new("plate").unwrap();

        let report = play_session(
            &console,
            &dictionary,
            SessionConfig::default(),
            PlayStyle::PlayLocal,
            Some(&target),
        )
        .unwrap();

        assert!(report.solved());
        assert_eq!(report.tries(), 2);
    }

    #[test]
    fn solve_external_session_answers_with_feedback() {
        let dictionary = dictionary();
        let words: Vec<Word> = dictionary.words().to_vec();
        let target = Word::new("grate").unwrap();

        // Script honest feedback for the engine's deterministic guesses
        let mut store = KnowledgeStore::from_dictionary(&dictionary, Rules::Simple);
        let mut input = String::new();
        loop {
            let guess = crate::solver::suggest(&alphabet_of(&words), store.candidates())
                .unwrap()
                .clone();
            let feedback = Feedback::score(&guess, &target, Rules::Simple);
            input.push_str(&format!("{feedback}\n"));
            if feedback.is_solved() {
                break;
            }
            store.update(&guess, &feedback).unwrap();
        }

        let console = console(&input);
        let report = play_session(
            &console,
            &dictionary,
            SessionConfig::default(),
            PlayStyle::SolveExternal,
            None,
        )
        .unwrap();

        assert!(report.solved());
        assert_eq!(report.rounds.last().unwrap().guess, target);
    }

    #[test]
    fn play_external_session_can_be_abandoned() {
        let dictionary = dictionary();
        let console = console("crane\nGGEGE\nquit\n");

        let report = play_session(
            &console,
            &dictionary,
            SessionConfig::default(),
            PlayStyle::PlayExternal,
            None,
        )
        .unwrap();

        assert_eq!(report.outcome, Outcome::Abandoned);
        assert_eq!(report.tries(), 1);
        assert!(transcript(console).contains("hint:"));
    }

    #[test]
    fn local_style_without_target_is_error() {
        let dictionary = dictionary();
        let console = console("");
        let result = play_session(
            &console,
            &dictionary,
            SessionConfig::default(),
            PlayStyle::SolveLocal,
            None,
        );
        assert!(result.is_err());
    }
}

//! TUI application state and logic

use crate::core::{Feedback, Rules, Word};
use crate::solver::{KnowledgeStore, coverage, letter_occurrences, suggest_scored};
use crate::wordlists::Dictionary;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Messages kept on screen
const MESSAGE_LIMIT: usize = 5;

/// State snapshot for undo
#[derive(Clone)]
pub struct StateSnapshot {
    pub store: KnowledgeStore,
    pub history: Vec<HistoryEntry>,
}

/// Application state
pub struct App<'a> {
    pub dictionary: &'a Dictionary,
    pub rules: Rules,
    pub store: KnowledgeStore,
    pub history: Vec<HistoryEntry>,
    pub current_guess: Option<GuessInfo>,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub manual_word: String,
    pub undo_stack: Vec<StateSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Feedback,
    ManualWord,
    WinCelebration,
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub guess: Word,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

#[derive(Debug, Clone)]
pub struct GuessInfo {
    pub word: Word,
    /// Letter coverage against the current candidates
    pub score: usize,
    /// Typed by the player rather than suggested
    pub manual: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    /// Index is the number of guesses; the last slot collects longer games
    pub guess_distribution: [usize; 8],
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(dictionary: &'a Dictionary, rules: Rules) -> Self {
        Self {
            dictionary,
            rules,
            store: KnowledgeStore::from_dictionary(dictionary, rules),
            history: Vec::new(),
            current_guess: None,
            input_buffer: String::new(),
            messages: vec![
                Message {
                    text: "Welcome! I'll suggest guesses that cover the most common letters."
                        .to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Enter feedback (e.g. 'EYGGE' or '🟩🟨⬜⬜🟩')".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Feedback,
            manual_word: String::new(),
            undo_stack: Vec::new(),
        }
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.dictionary.word_length()
    }

    pub fn compute_suggestion(&mut self) {
        match suggest_scored(self.dictionary.alphabet(), self.store.candidates()) {
            Ok(best) => {
                self.current_guess = Some(GuessInfo {
                    word: best.word.clone(),
                    score: best.score,
                    manual: false,
                });
            }
            Err(e) => {
                self.current_guess = None;
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    pub fn handle_feedback(&mut self, input: &str) {
        let feedback = match input.parse::<Feedback>() {
            Ok(feedback) => feedback,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        };
        let Some(guess) = self.current_guess.as_ref().map(|g| g.word.clone()) else {
            self.add_message("No guess to score. Press 'u' to undo.", MessageStyle::Error);
            return;
        };

        let snapshot = StateSnapshot {
            store: self.store.clone(),
            history: self.history.clone(),
        };
        let candidates_before = self.store.candidate_count();

        if let Err(e) = self.store.update(&guess, &feedback) {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }
        self.undo_stack.push(snapshot);

        let candidates_after = self.store.candidate_count();
        let solved = feedback.is_solved();
        self.history.push(HistoryEntry {
            guess,
            feedback,
            candidates_before,
            candidates_after,
        });
        self.input_buffer.clear();

        if solved {
            self.stats.games_won += 1;
            self.stats.total_games += 1;
            let guess_count = self.history.len().min(self.stats.guess_distribution.len() - 1);
            self.stats.guess_distribution[guess_count] += 1;

            self.input_mode = InputMode::WinCelebration;

            let celebration = match self.history.len() {
                1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
                2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                3 => "✨ SPLENDID! Three guesses! ✨",
                4 => "👏 GREAT JOB! Four guesses! 👏",
                5 => "🎉 NICE WORK! Five guesses! 🎉",
                6 => "😅 PHEW! Got it in six! 😅",
                _ => "🎊 SOLVED! 🎊",
            };
            self.add_message(celebration, MessageStyle::Success);
            self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
        } else if candidates_after == 0 {
            self.current_guess = None;
            self.add_message(
                "No candidates remain - feedback may be incorrect. Press 'u' to undo.",
                MessageStyle::Error,
            );
        } else {
            self.compute_suggestion();
            self.add_message(
                &format!("{candidates_after} candidates remaining"),
                MessageStyle::Info,
            );
        }
    }

    pub fn new_game(&mut self) {
        self.store = KnowledgeStore::from_dictionary(self.dictionary, self.rules);
        self.history.clear();
        self.undo_stack.clear();
        self.current_guess = None;
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Feedback;
        self.add_message("New game started!", MessageStyle::Info);
        self.compute_suggestion();
    }

    pub fn undo_last(&mut self) {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.store = snapshot.store;
            self.history = snapshot.history;
            self.input_mode = InputMode::Feedback;
            self.compute_suggestion();
            self.add_message("Undone!", MessageStyle::Info);
        } else {
            self.add_message("Nothing to undo!", MessageStyle::Error);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn candidates_count(&self) -> usize {
        self.store.candidate_count()
    }

    /// Share of the starting dictionary ruled out so far, in percent
    #[must_use]
    pub fn narrowed_percent(&self) -> u16 {
        let total = self.dictionary.len().max(1);
        let ruled_out = total.saturating_sub(self.candidates_count());
        // At most 100
        (ruled_out * 100 / total) as u16
    }

    pub fn use_manual_word(&mut self) {
        let text = self.manual_word.clone();

        let Some(word) = self.dictionary.get(&text).cloned() else {
            self.add_message(
                &format!(
                    "'{}' is not a {}-letter word in the dictionary!",
                    text.to_uppercase(),
                    self.word_length()
                ),
                MessageStyle::Error,
            );
            return;
        };

        let occurrences =
            letter_occurrences(self.dictionary.alphabet(), self.store.candidates());
        let score = coverage(&word, &occurrences);

        if let Some(suggested) = &self.current_guess {
            if score < suggested.score {
                self.add_message(
                    &format!(
                        "Note: {} covered {} more",
                        suggested.word.text().to_uppercase(),
                        suggested.score - score
                    ),
                    MessageStyle::Info,
                );
            }
        }

        self.add_message(
            &format!("Using: {} (coverage {score})", word.text().to_uppercase()),
            MessageStyle::Success,
        );
        self.current_guess = Some(GuessInfo {
            word,
            score,
            manual: true,
        });

        self.input_mode = InputMode::Feedback;
        self.manual_word.clear();
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::WinCelebration => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('u') => self.undo_last(),
                _ => {}
            },
            InputMode::Feedback => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('u') => self.undo_last(),
                KeyCode::Tab => {
                    self.input_mode = InputMode::ManualWord;
                    let message = format!("Enter your own word ({} letters)", self.word_length());
                    self.add_message(&message, MessageStyle::Info);
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => {
                    let input = self.input_buffer.clone();
                    self.handle_feedback(&input);
                }
                _ => {}
            },
            InputMode::ManualWord => match key.code {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Feedback;
                    self.manual_word.clear();
                    self.add_message("Cancelled manual word entry", MessageStyle::Info);
                }
                KeyCode::Tab => {
                    self.input_mode = InputMode::Feedback;
                    self.manual_word.clear();
                }
                KeyCode::Char(c) => {
                    if self.manual_word.chars().count() < self.word_length() && c.is_alphabetic() {
                        self.manual_word.extend(c.to_lowercase());
                    }
                }
                KeyCode::Backspace => {
                    self.manual_word.pop();
                }
                KeyCode::Enter => {
                    if self.manual_word.chars().count() == self.word_length() {
                        self.use_manual_word();
                    } else {
                        let message =
                            format!("Word must be exactly {} letters!", self.word_length());
                        self.add_message(&message, MessageStyle::Error);
                    }
                }
                _ => {}
            },
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    app.compute_suggestion();

    while !app.should_quit {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }

    log::info!(
        "Leaving TUI after {} games, {} won",
        app.stats.total_games,
        app.stats.games_won
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        let words = ["crane", "slate", "irate", "grate", "crate", "plate"]
            .iter()
            .map(|w| Word::new(w).unwrap());
        Dictionary::new(words, 5, "test").unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    fn started(dictionary: &Dictionary) -> App<'_> {
        let mut app = App::new(dictionary, Rules::Simple);
        app.compute_suggestion();
        app
    }

    #[test]
    fn suggestion_is_a_candidate() {
        let dictionary = dictionary();
        let app = started(&dictionary);
        let guess = app.current_guess.as_ref().unwrap();
        assert!(app.store.is_candidate(&guess.word));
        assert!(!guess.manual);
    }

    #[test]
    fn feedback_narrows_and_undo_restores() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);
        let first = app.current_guess.clone().unwrap().word;
        let feedback = Feedback::score(&first, &Word::new("plate").unwrap(), Rules::Simple);

        type_text(&mut app, &feedback.to_string());
        assert_eq!(app.history.len(), 1);
        assert!(app.candidates_count() < dictionary.len());
        assert!(app.input_buffer.is_empty());

        press(&mut app, KeyCode::Char('u'));
        assert!(app.history.is_empty());
        assert_eq!(app.candidates_count(), dictionary.len());
        assert_eq!(app.current_guess.unwrap().word, first);
    }

    #[test]
    fn invalid_feedback_changes_nothing() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);

        type_text(&mut app, "EXE");
        type_text(&mut app, "EEE");

        assert!(app.history.is_empty());
        assert!(app.undo_stack.is_empty());
        assert_eq!(app.candidates_count(), dictionary.len());
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);
    }

    #[test]
    fn solving_celebrates_and_new_game_resets() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);

        type_text(&mut app, "EEEEE");
        assert_eq!(app.input_mode, InputMode::WinCelebration);
        assert_eq!(app.stats.games_won, 1);
        assert_eq!(app.stats.guess_distribution[1], 1);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Feedback);
        assert!(app.history.is_empty());
        assert_eq!(app.candidates_count(), dictionary.len());
    }

    #[test]
    fn manual_word_must_be_in_dictionary() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.input_mode, InputMode::ManualWord);
        type_text(&mut app, "zzzzz");
        assert_eq!(app.input_mode, InputMode::ManualWord);
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);

        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "PLATE");
        assert_eq!(app.input_mode, InputMode::Feedback);
        let guess = app.current_guess.as_ref().unwrap();
        assert_eq!(guess.word.text(), "plate");
        assert!(guess.manual);
    }

    #[test]
    fn manual_word_input_is_capped_at_word_length() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);

        press(&mut app, KeyCode::Tab);
        for c in "plates".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.manual_word, "plate");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Feedback);
        assert!(app.manual_word.is_empty());
    }

    #[test]
    fn contradictory_feedback_reports_no_candidates() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);

        type_text(&mut app, "GGGGG");
        assert_eq!(app.candidates_count(), 0);
        assert!(app.current_guess.is_none());
        assert_eq!(app.narrowed_percent(), 100);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.narrowed_percent(), 0);
        assert!(app.current_guess.is_some());
    }

    #[test]
    fn ctrl_c_quits() {
        let dictionary = dictionary();
        let mut app = started(&dictionary);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}

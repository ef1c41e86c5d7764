//! TUI rendering with ratatui
//!
//! Visualizations for the Wordle solver interface.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Mark, Word};
use crate::solver::{LIST_CANDIDATES_BELOW, rank};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::collections::BTreeSet;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🎯 WORDLE SOLVER - Letter Frequency")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25), // Current guess info
            Constraint::Percentage(40), // Candidates
            Constraint::Percentage(35), // History
        ])
        .split(area);

    render_current_guess(f, app, chunks[0]);
    render_candidates(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
}

fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::Exact => Color::Green,
        Mark::Present => Color::Yellow,
        Mark::Absent => Color::DarkGray,
    }
}

fn render_current_guess(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Current Guess ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(guess) = &app.current_guess else {
        f.render_widget(Paragraph::new("No suggestion available").block(block), area);
        return;
    };

    let label = if guess.manual { "Your word: " } else { "Suggested: " };
    let content = vec![
        Line::from(vec![
            Span::raw(label),
            Span::styled(
                guess.word.text().to_uppercase(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Coverage:  {} over {} candidates",
            guess.score,
            app.candidates_count()
        )),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_candidates(f: &mut Frame, app: &App, area: Rect) {
    let candidates_count = app.candidates_count();

    let content = if candidates_count == 0 {
        vec![Line::from("No candidates left")]
    } else if candidates_count < LIST_CANDIDATES_BELOW {
        rank(app.dictionary.alphabet(), app.store.candidates())
            .into_iter()
            .map(|scored| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        scored.word.text().to_uppercase(),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!(" {}", scored.score),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            })
            .collect()
    } else {
        vec![Line::from(format!("{candidates_count} candidates remaining"))]
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Candidates ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );

    f.render_widget(paragraph, area);
}

fn guess_spans(guess: &Word, marks: &[Mark]) -> Vec<Span<'static>> {
    guess
        .letters()
        .iter()
        .zip(marks)
        .map(|(letter, &mark)| {
            Span::styled(
                format!(" {} ", letter.to_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(mark_color(mark))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect()
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history_items: Vec<ListItem> = app
        .history
        .iter()
        .enumerate()
        .rev()
        .take(6)
        .map(|(i, entry)| {
            let mut spans = vec![Span::raw(format!("{}: ", i + 1))];
            spans.extend(guess_spans(&entry.guess, entry.feedback.marks()));
            spans.push(Span::raw(format!(
                " {} → {}",
                entry.candidates_before, entry.candidates_after
            )));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let history =
        List::new(history_items).block(Block::default().title(" History ").borders(Borders::ALL));

    f.render_widget(history, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Search space gauge
            Constraint::Percentage(60), // Knowledge
            Constraint::Min(4),         // Messages
        ])
        .split(area);

    render_search_progress(f, app, chunks[0]);
    render_knowledge(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_search_progress(f: &mut Frame, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Search Space Narrowed ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(app.narrowed_percent())
        .label(format!(
            "{} of {} words left",
            app.candidates_count(),
            app.dictionary.len()
        ));

    f.render_widget(gauge, area);
}

fn letters(set: &BTreeSet<char>) -> String {
    set.iter().map(|c| c.to_uppercase().to_string()).collect::<Vec<_>>().join(" ")
}

fn render_knowledge(f: &mut Frame, app: &App, area: Rect) {
    let store = &app.store;
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Required: "),
            Span::styled(letters(store.required()), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("Excluded: "),
            Span::styled(letters(store.excluded()), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    for (i, position) in store.positions().iter().enumerate() {
        let text = match position.fixed() {
            Some(letter) => Span::styled(
                letter.to_uppercase().to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::raw(letters(position.allowed())),
        };
        lines.push(Line::from(vec![Span::raw(format!("{:>2}: ", i + 1)), text]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Knowledge ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::WinCelebration => (
            " 🎉 CONGRATULATIONS! 🎉 | Press 'n' for new game or 'q' to quit ".to_string(),
            "",
            Color::Green,
        ),
        InputMode::Feedback => (
            " Enter Feedback (E=Exact Y=Present G=Absent, or emojis) | TAB for manual word "
                .to_string(),
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::ManualWord => (
            format!(
                " Enter Word to Try ({} letters) | ESC to cancel ",
                app.word_length()
            ),
            app.manual_word.as_str(),
            Color::Cyan,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let mode = Paragraph::new(format!("Rules: {}", app.rules.name())).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        if app.stats.total_games > 0 {
            app.stats.games_won as f64 / app.stats.total_games as f64 * 100.0
        } else {
            0.0
        }
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let candidates_text = format!("Candidates: {}", app.candidates_count());
    let candidates = Paragraph::new(candidates_text).alignment(Alignment::Center);
    f.render_widget(candidates, chunks[2]);

    let help_text = if app.candidates_count() == 0 && !app.history.is_empty() {
        "q: Quit | n: New Game | u: Undo"
    } else {
        "q: Quit | u: Undo | Enter: Submit | TAB: Manual Word"
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

//! Header and footer status bar widgets for the Detox TUI.
//!
//! The status bar provides:
//! - Header: application title, view tabs and a running-timer indicator
//! - Footer: keybinding hints for the current view or dialog

use crate::app::{App, Mode, View};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the header bar with title and tabs.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "Brain Detox",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
    ];

    if app.is_onboarding() {
        spans.push(Span::styled("Welcome", Style::default().fg(Color::White)));
    } else {
        for (index, view) in View::ALL.iter().enumerate() {
            let style = if *view == app.view {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!(" {} {} ", index.saturating_add(1), view.title()),
                style,
            ));
            spans.push(Span::raw(" "));
        }
    }

    if app.tracker.is_running() {
        spans.push(Span::styled(
            format!(" | {} {}", app.tracker.kind().label(), app.tracker.clock()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Renders the footer bar with keybinding hints, or the latest status
/// message when there is one.
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (index, (key, label)) in footer_hints(app).iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  |  ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(format!(" {label}")));
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::styled("  |  ", sep_style));
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Returns `(key, label)` pairs for the current context.
fn footer_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.is_onboarding() {
        return vec![("Enter", "next"), ("<-", "back"), ("s", "skip")];
    }

    match app.mode {
        Mode::AddApp(_) => {
            return vec![
                ("Tab", "field"),
                ("<-/->", "choose"),
                ("Enter", "add"),
                ("Esc", "cancel"),
            ]
        }
        Mode::EditLimit { .. } | Mode::EditGoal { .. } => {
            return vec![("0-9", "minutes"), ("Enter", "save"), ("Esc", "cancel")]
        }
        Mode::ConfirmClear => return vec![("y", "clear everything"), ("n", "keep")],
        Mode::Normal => {}
    }

    let mut hints = vec![("Tab", "view")];
    match app.view {
        View::Dashboard => hints.push(("j/k", "select")),
        View::Blocker => hints.extend([
            ("j/k", "select"),
            ("a", "add"),
            ("b", "block"),
            ("e", "limit"),
            ("d", "remove"),
        ]),
        View::Tracker => hints.extend([
            ("Space", if app.tracker.is_running() { "pause" } else { "start" }),
            ("s", "stop"),
            ("f", "focus/break"),
            ("g", "goal"),
        ]),
        View::Settings => hints.extend([("j/k", "select"), ("Enter", "toggle")]),
    }
    hints.push(("q", "quit"));
    hints
}

//! Onboarding walkthrough shown on first launch.

use detox_core::Onboarding;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_onboarding(frame: &mut Frame, area: Rect, onboarding: &Onboarding) {
    let Some(step) = onboarding.current() else {
        return;
    };

    let dots: Vec<Span> = (0..onboarding.len())
        .map(|index| {
            if index == onboarding.index() {
                Span::styled("● ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let next_label = if onboarding.is_last() { "Get Started" } else { "Next" };
    let mut nav = Vec::new();
    if !onboarding.is_first() {
        nav.push(Span::styled("<- Back    ", Style::default().fg(Color::DarkGray)));
    }
    nav.push(Span::styled(
        format!("{next_label} ->"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            step.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(step.description),
        Line::from(""),
        Line::from(dots),
        Line::from(""),
        Line::from(nav),
        Line::from(Span::styled("Skip onboarding (s)", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(
                    " Step {} of {} ",
                    onboarding.index().saturating_add(1),
                    onboarding.len()
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}

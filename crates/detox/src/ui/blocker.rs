//! App Blocker view: tracked apps with their limits and block state.

use crate::app::App;
use crate::ui::dashboard::usage_item;
use detox_core::{AppProgress, BlockerSummary};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_blocker(frame: &mut Frame, area: Rect, app: &App) {
    let [summary_area, list_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .areas(area);

    render_summary(frame, summary_area, BlockerSummary::of(app.data()));

    let block = Block::default()
        .title(" Tracked Apps ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    if app.data().apps.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No apps tracked. Press a to add one.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, list_area);
        return;
    }

    let items: Vec<ListItem> = app
        .data()
        .apps
        .iter()
        .map(AppProgress::of)
        .enumerate()
        .map(|(index, row)| usage_item(&row, index == app.selected_app))
        .collect();
    frame.render_widget(List::new(items).block(block), list_area);
}

fn render_summary(frame: &mut Frame, area: Rect, summary: BlockerSummary) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("  Tracked Apps: ", label),
        Span::styled(summary.tracked_apps.to_string(), value.fg(Color::Blue)),
        Span::styled("    Currently Blocked: ", label),
        Span::styled(summary.currently_blocked.to_string(), value.fg(Color::Red)),
        Span::styled("    Blocked Attempts: ", label),
        Span::styled(summary.blocked_attempts.to_string(), value.fg(Color::Green)),
    ]);
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

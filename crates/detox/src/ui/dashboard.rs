//! Dashboard view: stat cards, per-app usage and achievements.

use crate::app::App;
use crate::ui::theme::{level_color, progress_bar, stat_color, status_color};
use detox_core::{AppProgress, DashboardSummary, StatCard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const BAR_WIDTH: usize = 20;

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let summary = DashboardSummary::of(app.data());

    let achievements_height = u16::try_from(summary.achievements.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(8);
    let [cards_area, apps_area, achievements_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(4),
            Constraint::Length(achievements_height),
        ])
        .areas(area);

    render_cards(frame, cards_area, &summary.cards);
    render_app_usage(frame, apps_area, &summary.apps, app.selected_app);
    render_achievements(frame, achievements_area, &summary);
}

fn render_cards(frame: &mut Frame, area: Rect, cards: &[StatCard; 4]) {
    let areas: [Rect; 4] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .areas(area);

    for (card, card_area) in cards.iter().zip(areas) {
        let color = stat_color(card.kind);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            card.value.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(format!(" {} ", card.label))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(paragraph, card_area);
    }
}

fn render_app_usage(frame: &mut Frame, area: Rect, apps: &[AppProgress], selected: usize) {
    let block = Block::default()
        .title(" App Usage Today ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    if apps.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No apps tracked yet. Add one in the App Blocker view.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = apps
        .iter()
        .enumerate()
        .map(|(index, app)| usage_item(app, index == selected))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

/// Builds one usage row: `> icon name  [bar]  used / limit  status`.
pub(crate) fn usage_item(app: &AppProgress, is_selected: bool) -> ListItem<'static> {
    let line = Line::from(vec![
        Span::styled(
            if is_selected { ">" } else { " " },
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} ", app.icon)),
        Span::styled(
            format!("{:<16}", app.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {:<14}", app.category),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            progress_bar(app.fraction, BAR_WIDTH),
            Style::default().fg(level_color(app.level)),
        ),
        Span::raw(format!(" {:<14} ", app.usage_display)),
        Span::styled(
            app.status.label(),
            Style::default().fg(status_color(app.status)),
        ),
    ]);
    ListItem::new(line)
}

fn render_achievements(frame: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let mut lines: Vec<Line> = summary
        .achievements
        .iter()
        .map(|achievement| {
            Line::from(vec![
                Span::styled("  * ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    achievement.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", achievement.detail),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing yet today. Keep going!",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Today's Achievements ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, area);
}

//! Settings view: local toggles and data management.

use crate::app::{App, SettingsItem};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_settings(frame: &mut Frame, area: Rect, app: &App) {
    let [list_area, about_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .areas(area);

    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .enumerate()
        .map(|(index, item)| settings_item(app, *item, index == app.selected_setting))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    frame.render_widget(list, list_area);

    let about = Paragraph::new(Line::from(vec![
        Span::styled("  Brain Detox ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            "  Your data stays on this machine.",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().title(" About ").borders(Borders::ALL));
    frame.render_widget(about, about_area);
}

fn settings_item(app: &App, item: SettingsItem, is_selected: bool) -> ListItem<'static> {
    let marker = Span::styled(
        if is_selected { " > " } else { "   " },
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    );
    let name_style = Style::default().add_modifier(Modifier::BOLD);

    let line = match item {
        SettingsItem::Toggle(toggle) => {
            let on = app.settings.get(toggle);
            Line::from(vec![
                marker,
                Span::styled(
                    if on { "[on]  " } else { "[off] " },
                    Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
                ),
                Span::styled(format!("{:<16}", item.label()), name_style),
                Span::styled(toggle.description(), Style::default().fg(Color::DarkGray)),
            ])
        }
        SettingsItem::ExportData => Line::from(vec![
            marker,
            Span::styled(item.label(), name_style.fg(Color::Blue)),
            Span::styled(
                "  Download all your tracking data as JSON",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        SettingsItem::ClearData => Line::from(vec![
            marker,
            Span::styled(item.label(), name_style.fg(Color::Red)),
            Span::styled(
                "  Delete all stored data and start over",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        SettingsItem::ResetOnboarding => Line::from(vec![
            marker,
            Span::styled(item.label(), name_style.fg(Color::Cyan)),
            Span::styled(
                "  Walk through the introduction again",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };
    ListItem::new(line)
}

//! Modal dialogs drawn over the current view.

use crate::app::{App, Mode};
use crate::ui::layout::centered_rect;
use detox_core::{FormField, NewAppForm};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Renders the dialog for the current mode, if any.
pub fn render_dialog(frame: &mut Frame, area: Rect, app: &App) {
    match &app.mode {
        Mode::Normal => {}
        Mode::AddApp(form) => render_add_app(frame, area, form),
        Mode::EditLimit { id, input } => {
            let name = app
                .data()
                .app(id)
                .map(|tracked| tracked.name.clone())
                .unwrap_or_default();
            render_number_prompt(frame, area, &format!(" Daily limit for {name} "), input);
        }
        Mode::EditGoal { input } => {
            render_number_prompt(frame, area, " Daily focus goal ", input);
        }
        Mode::ConfirmClear => render_confirm_clear(frame, area),
    }
}

fn render_add_app(frame: &mut Frame, area: Rect, form: &NewAppForm) {
    let popup = centered_rect(54, 10, area);
    let lines = vec![
        Line::from(""),
        field_line("Name", form.name.clone(), form.focused == FormField::Name, true),
        field_line("Icon", format!("< {} >", form.icon()), form.focused == FormField::Icon, false),
        field_line(
            "Category",
            format!("< {} >", form.category()),
            form.focused == FormField::Category,
            false,
        ),
        field_line(
            "Limit (min)",
            form.time_limit.clone(),
            form.focused == FormField::TimeLimit,
            true,
        ),
        Line::from(""),
        Line::from(Span::styled(
            if form.name.trim().is_empty() {
                "  Enter a name to add the app"
            } else {
                "  Press Enter to add"
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Add New App ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, popup);
}

fn field_line(label: &'static str, value: String, focused: bool, text: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if focused && text { "_" } else { "" };
    Line::from(vec![
        Span::styled(if focused { " > " } else { "   " }, label_style),
        Span::styled(format!("{label:<12}"), label_style),
        Span::raw(format!("{value}{cursor}")),
    ])
}

fn render_number_prompt(frame: &mut Frame, area: Rect, title: &str, input: &str) {
    let popup = centered_rect(44, 5, area);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Minutes: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{input}_"),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, popup);
}

fn render_confirm_clear(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(52, 6, area);
    let lines = vec![
        Line::from(""),
        Line::from("  Are you sure you want to clear all data?"),
        Line::from(Span::styled(
            "  This cannot be undone.  (y/n)",
            Style::default().fg(Color::Red),
        )),
    ];

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Clear All Data ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, popup);
}

//! Time Tracker view: stopwatch, daily goal, weekly overview.

use crate::app::App;
use crate::ui::theme::{progress_bar, session_kind_color};
use detox_core::{format_minutes, weekly_overview, QuickStats};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GOAL_BAR_WIDTH: usize = 24;
const WEEK_BAR_WIDTH: usize = 20;

pub fn render_tracker(frame: &mut Frame, area: Rect, app: &App) {
    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .areas(area);

    render_stopwatch(frame, left, app);
    render_week(frame, right, app);
}

fn render_stopwatch(frame: &mut Frame, area: Rect, app: &App) {
    let tracker = &app.tracker;
    let data = app.data();
    let accent = session_kind_color(tracker.kind());
    let label = Style::default().fg(Color::DarkGray);

    let state = if tracker.is_running() {
        Span::styled("running", Style::default().fg(Color::Green))
    } else if tracker.elapsed_seconds() > 0 {
        Span::styled("paused", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("ready", label)
    };

    let goal_line = if tracker.goal_reached(data) {
        Span::styled(
            "  Goal reached! Nice focus today.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("  Keep going to reach your goal.", label)
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {} Session", tracker.kind().label()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            state,
        ]),
        Line::from(Span::styled(format!("  {}", tracker.kind().tagline()), label)),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", tracker.clock()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Daily Goal ", label),
            Span::styled(
                progress_bar(tracker.goal_progress(data), GOAL_BAR_WIDTH),
                Style::default().fg(accent),
            ),
        ]),
        Line::from(vec![
            Span::styled("  ", label),
            Span::raw(format!(
                "{} of {} focused",
                format_minutes(i64::try_from(data.focus_time).unwrap_or(i64::MAX)),
                format_minutes(tracker.daily_goal())
            )),
        ]),
        Line::from(goal_line),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Stopwatch ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(paragraph, area);
}

fn render_week(frame: &mut Frame, area: Rect, app: &App) {
    let data = app.data();
    let label = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for day in weekly_overview(data) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<6}", day.day), label),
            Span::styled(
                progress_bar(day.focus_share(), WEEK_BAR_WIDTH),
                Style::default().fg(Color::Blue),
            ),
            Span::raw(format!("  {}m focus / {}m distracted", day.focus, day.distraction)),
        ]));
    }

    let stats = QuickStats::of(data);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Screen Time: ", label),
        Span::raw(format_minutes(
            i64::try_from(stats.total_screen_time).unwrap_or(i64::MAX),
        )),
        Span::styled("    Focus: ", label),
        Span::raw(format_minutes(i64::try_from(stats.focus_time).unwrap_or(i64::MAX))),
        Span::styled("    Focus Ratio: ", label),
        Span::styled(
            format!("{}%", stats.focus_ratio_percent),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Weekly Overview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    frame.render_widget(paragraph, area);
}

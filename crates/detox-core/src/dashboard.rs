//! Read-only dashboard projection of the session.

use crate::metrics::{format_minutes, progress_fraction, AppStatus, ProgressLevel};
use crate::model::{AppId, TrackedApp};
use crate::session::SessionData;

/// Which aggregate a stat card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    TotalScreenTime,
    FocusTime,
    DistractionTime,
    BlockedAttempts,
}

/// One aggregate card of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub kind: StatKind,
    pub label: &'static str,
    pub value: String,
}

/// Per-app usage row.
#[derive(Debug, Clone, PartialEq)]
pub struct AppProgress {
    pub id: AppId,
    pub name: String,
    pub icon: String,
    pub category: String,
    /// `"used / limit"`, both formatted as durations.
    pub usage_display: String,
    pub fraction: f64,
    pub level: ProgressLevel,
    pub status: AppStatus,
    pub is_blocked: bool,
}

impl AppProgress {
    pub fn of(app: &TrackedApp) -> Self {
        Self {
            id: app.id.clone(),
            name: app.name.clone(),
            icon: app.icon.clone(),
            category: app.category.clone(),
            usage_display: format!(
                "{} / {}",
                format_minutes(app.time_used),
                format_minutes(app.time_limit)
            ),
            fraction: progress_fraction(app.time_used, app.time_limit),
            level: ProgressLevel::of(app.time_used, app.time_limit),
            status: AppStatus::of(app),
            is_blocked: app.is_blocked,
        }
    }
}

/// Something the user did well today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub title: String,
    pub detail: &'static str,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub cards: [StatCard; 4],
    pub apps: Vec<AppProgress>,
    pub achievements: Vec<Achievement>,
}

impl DashboardSummary {
    pub fn of(data: &SessionData) -> Self {
        let card = |kind, label, value| StatCard { kind, label, value };
        let minutes = |m: u64| format_minutes(i64::try_from(m).unwrap_or(i64::MAX));

        Self {
            cards: [
                card(StatKind::TotalScreenTime, "Total Screen Time", minutes(data.total_screen_time)),
                card(StatKind::FocusTime, "Focus Time", minutes(data.focus_time)),
                card(StatKind::DistractionTime, "Distraction Time", minutes(data.distraction_time)),
                card(StatKind::BlockedAttempts, "Blocked Attempts", data.blocked_attempts.to_string()),
            ],
            apps: data.apps.iter().map(AppProgress::of).collect(),
            achievements: achievements(data),
        }
    }
}

/// Derives today's achievements: every unblocked app still under its
/// limit, plus a milestone for each full hour of focus.
fn achievements(data: &SessionData) -> Vec<Achievement> {
    let mut list: Vec<Achievement> = data
        .apps
        .iter()
        .filter(|app| !app.is_blocked && !app.limit_reached())
        .map(|app| Achievement {
            title: format!("Stayed under limit for {}", app.name),
            detail: "Great job keeping usage in check!",
        })
        .collect();

    let focus_hours = data.focus_time / 60;
    if focus_hours > 0 {
        list.push(Achievement {
            title: format!(
                "{focus_hours} hour{} of focused work time",
                if focus_hours == 1 { "" } else { "s" }
            ),
            detail: "You're building great focus habits!",
        });
    }

    list
}

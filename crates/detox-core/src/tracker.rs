//! Manually driven stopwatch for focus and break sessions.
//!
//! The tracker is local view state: only [`TimeTracker::stop`] touches the
//! session, and only for focus sessions.

use crate::metrics::{format_clock, parse_or_zero, share};
use crate::session::{SessionData, SessionPatch};
use std::fmt;
use tracing::info;

/// Default daily focus goal in minutes.
pub const DEFAULT_DAILY_GOAL: i64 = 120;

/// Kind of the session being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKind {
    #[default]
    Focus,
    Break,
}

impl SessionKind {
    /// Returns the display label for this kind.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Focus Session",
            Self::Break => "Break Time",
        }
    }

    /// Returns the encouragement shown under the clock.
    #[must_use]
    pub fn tagline(&self) -> &'static str {
        match self {
            Self::Focus => "Stay focused and productive!",
            Self::Break => "Take a well-deserved break!",
        }
    }

    /// Returns the other kind.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Time Tracker
// ============================================================================

/// Stopwatch state plus the non-persisted daily goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTracker {
    elapsed_seconds: u64,
    running: bool,
    kind: SessionKind,
    daily_goal: i64,
}

impl Default for TimeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_GOAL)
    }
}

impl TimeTracker {
    /// Creates a stopped tracker with the given daily goal.
    pub fn new(daily_goal: i64) -> Self {
        Self {
            elapsed_seconds: 0,
            running: false,
            kind: SessionKind::Focus,
            daily_goal,
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn daily_goal(&self) -> i64 {
        self.daily_goal
    }

    /// Returns the elapsed time as a stopwatch reading.
    pub fn clock(&self) -> String {
        format_clock(self.elapsed_seconds)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops ticking without committing the elapsed time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn set_kind(&mut self, kind: SessionKind) {
        self.kind = kind;
    }

    /// Sets the daily goal from raw input; invalid input becomes zero.
    pub fn set_daily_goal_input(&mut self, input: &str) {
        self.daily_goal = parse_or_zero(input);
    }

    pub fn set_daily_goal(&mut self, minutes: i64) {
        self.daily_goal = minutes;
    }

    /// Advances the stopwatch by one second if it is running.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }

    /// Ends the session and resets the stopwatch.
    ///
    /// For a focus session, returns a patch adding the whole elapsed
    /// minutes to both focus time and total screen time. Break sessions
    /// return `None`.
    pub fn stop(&mut self, data: &SessionData) -> Option<SessionPatch> {
        let minutes = self.elapsed_seconds / 60;
        let kind = self.kind;

        self.running = false;
        self.elapsed_seconds = 0;

        match kind {
            SessionKind::Focus => {
                info!(minutes, "Focus session committed");
                Some(SessionPatch {
                    focus_time: Some(data.focus_time.saturating_add(minutes)),
                    total_screen_time: Some(data.total_screen_time.saturating_add(minutes)),
                    ..SessionPatch::default()
                })
            }
            SessionKind::Break => None,
        }
    }

    /// Returns today's progress toward the daily goal, `min(focus/goal, 1)`.
    ///
    /// A zero or negative goal counts as met once any focus time exists.
    pub fn goal_progress(&self, data: &SessionData) -> f64 {
        if self.daily_goal <= 0 {
            return if data.focus_time > 0 { 1.0 } else { 0.0 };
        }
        (data.focus_time as f64 / self.daily_goal as f64).min(1.0)
    }

    /// Returns true once the daily goal is met.
    pub fn goal_reached(&self, data: &SessionData) -> bool {
        self.goal_progress(data) >= 1.0
    }
}

// ============================================================================
// Weekly Overview
// ============================================================================

/// Focus and distraction minutes of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub day: &'static str,
    pub focus: u64,
    pub distraction: u64,
}

impl DayEntry {
    /// Share of the day's tracked time spent focused.
    pub fn focus_share(&self) -> f64 {
        share(self.focus, self.focus.saturating_add(self.distraction))
    }
}

/// Historical entries shown before today's live entry.
const PAST_WEEK: [(&str, u64, u64); 6] = [
    ("Mon", 95, 45),
    ("Tue", 120, 30),
    ("Wed", 85, 60),
    ("Thu", 140, 25),
    ("Fri", 110, 40),
    ("Sat", 75, 80),
];

/// Returns the weekly overview: six fixed days plus today's live totals.
pub fn weekly_overview(data: &SessionData) -> Vec<DayEntry> {
    PAST_WEEK
        .iter()
        .map(|&(day, focus, distraction)| DayEntry { day, focus, distraction })
        .chain(std::iter::once(DayEntry {
            day: "Today",
            focus: data.focus_time,
            distraction: data.distraction_time,
        }))
        .collect()
}

// ============================================================================
// Quick Stats
// ============================================================================

/// Summary figures shown under the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickStats {
    pub total_screen_time: u64,
    pub focus_time: u64,
    /// `round(focus / total * 100)`, or 0 when either is zero.
    pub focus_ratio_percent: u64,
}

impl QuickStats {
    pub fn of(data: &SessionData) -> Self {
        let focus_ratio_percent = if data.focus_time == 0 || data.total_screen_time == 0 {
            0
        } else {
            (data.focus_time as f64 / data.total_screen_time as f64 * 100.0).round() as u64
        };
        Self {
            total_screen_time: data.total_screen_time,
            focus_time: data.focus_time,
            focus_ratio_percent,
        }
    }
}

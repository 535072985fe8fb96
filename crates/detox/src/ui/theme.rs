//! Shared theme utilities for the Detox TUI.
//!
//! Provides consistent styling across all views.

use detox_core::{AppStatus, ProgressLevel, SessionKind, StatKind};
use ratatui::style::Color;

/// Returns the color of a usage bar.
///
/// Color coding follows a traffic-light pattern:
/// - Green: below 80% of the limit
/// - Yellow: 80% of the limit or more
/// - Red: limit reached or exceeded
pub fn level_color(level: ProgressLevel) -> Color {
    match level {
        ProgressLevel::Normal => Color::Green,
        ProgressLevel::Warning => Color::Yellow,
        ProgressLevel::Exceeded => Color::Red,
    }
}

/// Returns the color of an app's status badge.
pub fn status_color(status: AppStatus) -> Color {
    match status {
        AppStatus::Active => Color::Green,
        AppStatus::LimitReached => Color::Yellow,
        AppStatus::Blocked => Color::Red,
    }
}

/// Returns the accent color of a dashboard stat card.
pub fn stat_color(kind: StatKind) -> Color {
    match kind {
        StatKind::TotalScreenTime => Color::Blue,
        StatKind::FocusTime => Color::Green,
        StatKind::DistractionTime => Color::Red,
        StatKind::BlockedAttempts => Color::Magenta,
    }
}

/// Returns the accent color of a tracker session.
pub fn session_kind_color(kind: SessionKind) -> Color {
    match kind {
        SessionKind::Focus => Color::Blue,
        SessionKind::Break => Color::Green,
    }
}

/// Builds an ASCII progress bar.
///
/// `fraction` is clamped to `0.0..=1.0`; NaN renders as empty.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let safe = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled = ((safe * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_color() {
        assert_eq!(level_color(ProgressLevel::Normal), Color::Green);
        assert_eq!(level_color(ProgressLevel::Warning), Color::Yellow);
        assert_eq!(level_color(ProgressLevel::Exceeded), Color::Red);
    }

    #[test]
    fn test_status_color() {
        assert_eq!(status_color(AppStatus::Active), Color::Green);
        assert_eq!(status_color(AppStatus::Blocked), Color::Red);
    }

    #[test]
    fn test_progress_bar_empty() {
        assert_eq!(progress_bar(0.0, 10), "[          ]");
    }

    #[test]
    fn test_progress_bar_half() {
        assert_eq!(progress_bar(0.5, 10), "[=====     ]");
    }

    #[test]
    fn test_progress_bar_clamped() {
        assert_eq!(progress_bar(1.7, 10), "[==========]");
        assert_eq!(progress_bar(-0.5, 4), "[    ]");
    }

    #[test]
    fn test_progress_bar_nan() {
        assert_eq!(progress_bar(f64::NAN, 4), "[    ]");
    }
}

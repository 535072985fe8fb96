//! Derived metrics shared by the dashboard, blocker and tracker views.

use crate::model::TrackedApp;
use std::fmt;
use std::str::FromStr;

/// Usage share at which an app's progress turns to the warning level.
pub const WARNING_THRESHOLD: f64 = 0.8;

// ============================================================================
// App Status
// ============================================================================

/// Display status of a tracked app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppStatus {
    /// Usage is below the daily limit and the app is not blocked.
    Active,
    /// Usage has reached the daily limit.
    LimitReached,
    /// The block flag is set. Takes precedence over the limit check.
    Blocked,
}

impl AppStatus {
    /// Derives the status of an app.
    pub fn of(app: &TrackedApp) -> Self {
        if app.is_blocked {
            Self::Blocked
        } else if app.limit_reached() {
            Self::LimitReached
        } else {
            Self::Active
        }
    }

    /// Returns the display label for this status.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::LimitReached => "Limit Reached",
            Self::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Traffic-light level of an app's usage against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressLevel {
    /// Below 80% of the limit (green).
    Normal,
    /// At or above 80% of the limit (yellow).
    Warning,
    /// At or above the limit (red).
    Exceeded,
}

impl ProgressLevel {
    /// Classifies usage against a limit.
    pub fn of(used: i64, limit: i64) -> Self {
        if used >= limit {
            Self::Exceeded
        } else if used as f64 >= limit as f64 * WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Returns the bar fill fraction `min(used / limit, 1)`.
///
/// A zero or negative limit counts as exhausted (1.0). Negative usage
/// yields 0.0.
pub fn progress_fraction(used: i64, limit: i64) -> f64 {
    if limit <= 0 {
        return 1.0;
    }
    (used as f64 / limit as f64).clamp(0.0, 1.0)
}

/// Returns `part / whole` clamped to `[0, 1]`, or 0.0 when `whole` is zero.
pub fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64).min(1.0)
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats minutes as `"Xh Ym"`, omitting hours when zero (`"45m"`).
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.unsigned_abs();
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{sign}{hours}h {mins}m")
    } else {
        format!("{sign}{mins}m")
    }
}

/// Formats elapsed seconds as a stopwatch reading: `M:SS` or `H:MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

// ============================================================================
// Input Parsing
// ============================================================================

/// Parses a numeric input field, falling back to zero on any failure.
pub fn parse_or_zero<T>(input: &str) -> T
where
    T: FromStr + Default,
{
    input.trim().parse().unwrap_or_default()
}

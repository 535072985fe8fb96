//! Tracked app entities and value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories offered when adding an app. The field itself is an open
/// string, so stored data may carry values outside this list.
pub const APP_CATEGORIES: &[&str] = &[
    "Social",
    "Entertainment",
    "Games",
    "News",
    "Shopping",
    "Other",
];

/// Icon glyphs offered when adding an app.
pub const APP_ICONS: &[&str] = &["📱", "📺", "🎮", "📰", "🛒", "💬", "📸", "🎵", "📚", "🌐"];

/// Default category for a new app.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Default icon for a new app.
pub const DEFAULT_ICON: &str = "📱";

/// Default daily limit for a new app, in minutes.
pub const DEFAULT_TIME_LIMIT: i64 = 30;

// ============================================================================
// Type-Safe Identifiers
// ============================================================================

/// Unique identifier for a tracked app.
///
/// Generated apps use the creation time in milliseconds since the epoch
/// (e.g. "1718000000000"); the sample dataset uses "1" through "4".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Creates a new AppId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates an identifier that is distinct from every id in `apps`.
    ///
    /// Starts from the millisecond timestamp of `now` and counts upward
    /// until no existing app carries the candidate.
    pub fn generate(apps: &[TrackedApp], now: DateTime<Utc>) -> Self {
        let mut candidate = now.timestamp_millis();
        loop {
            let id = candidate.to_string();
            if !apps.iter().any(|app| app.id.as_str() == id) {
                return Self(id);
            }
            candidate = candidate.saturating_add(1);
        }
    }

    /// Returns the underlying string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AppId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AppId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tracked App
// ============================================================================

/// One user-managed application entry with its own limit, usage and block
/// status.
///
/// `time_used` may exceed `time_limit`; that is a normal, displayed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedApp {
    pub id: AppId,
    pub name: String,
    pub icon: String,
    /// Daily limit in minutes. Not validated; zero or negative values are
    /// accepted and treated as already exhausted.
    pub time_limit: i64,
    /// Minutes used today.
    pub time_used: i64,
    pub is_blocked: bool,
    pub category: String,
}

impl TrackedApp {
    /// Returns true once usage has reached the daily limit.
    #[must_use]
    pub fn limit_reached(&self) -> bool {
        self.time_used >= self.time_limit
    }
}

/// Input for creating a new tracked app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApp {
    pub name: String,
    pub icon: String,
    pub time_limit: i64,
    pub category: String,
}

impl NewApp {
    /// Creates a new app request with the default icon, category and limit.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for NewApp {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: DEFAULT_ICON.to_string(),
            time_limit: DEFAULT_TIME_LIMIT,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

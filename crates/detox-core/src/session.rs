//! The session aggregate and its merge-update contract.

use crate::model::{AppId, TrackedApp};
use serde::{Deserialize, Serialize};

// ============================================================================
// Session Data
// ============================================================================

/// Aggregate application state: daily totals plus the ordered app list.
///
/// This is the sole unit of persisted state. It is read wholesale at
/// startup and written wholesale after every change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Minutes of screen time today.
    pub total_screen_time: u64,
    /// Minutes spent in focus sessions today.
    pub focus_time: u64,
    /// Minutes spent on distracting apps today.
    pub distraction_time: u64,
    /// Number of times a blocked app was opened.
    pub blocked_attempts: u64,
    pub apps: Vec<TrackedApp>,
}

impl SessionData {
    /// Returns the fixed sample dataset used on a fresh install.
    pub fn sample() -> Self {
        let app = |id: &str, name: &str, icon: &str, limit: i64, used: i64, blocked: bool, category: &str| {
            TrackedApp {
                id: AppId::new(id),
                name: name.to_string(),
                icon: icon.to_string(),
                time_limit: limit,
                time_used: used,
                is_blocked: blocked,
                category: category.to_string(),
            }
        };

        Self {
            total_screen_time: 205,
            focus_time: 120,
            distraction_time: 85,
            blocked_attempts: 12,
            apps: vec![
                app("1", "Social Media", "📱", 30, 45, true, "Social"),
                app("2", "YouTube", "📺", 60, 25, false, "Entertainment"),
                app("3", "Gaming", "🎮", 90, 120, true, "Games"),
                app("4", "News Apps", "📰", 20, 15, false, "News"),
            ],
        }
    }

    /// Shallow-merges `patch` onto this snapshot and returns the result.
    ///
    /// Fields absent from the patch are carried over unchanged. Fields
    /// present replace the old value entirely; a patched `apps` list
    /// replaces the whole list. No validation is performed.
    #[must_use]
    pub fn merge(&self, patch: &SessionPatch) -> Self {
        Self {
            total_screen_time: patch.total_screen_time.unwrap_or(self.total_screen_time),
            focus_time: patch.focus_time.unwrap_or(self.focus_time),
            distraction_time: patch.distraction_time.unwrap_or(self.distraction_time),
            blocked_attempts: patch.blocked_attempts.unwrap_or(self.blocked_attempts),
            apps: match &patch.apps {
                Some(apps) => apps.clone(),
                None => self.apps.clone(),
            },
        }
    }

    /// Looks up an app by identifier.
    pub fn app(&self, id: &AppId) -> Option<&TrackedApp> {
        self.apps.iter().find(|app| &app.id == id)
    }

    /// Returns the number of apps with the block flag set.
    pub fn blocked_count(&self) -> usize {
        self.apps.iter().filter(|app| app.is_blocked).count()
    }
}

// ============================================================================
// Partial Update
// ============================================================================

/// A partial [`SessionData`]: every top-level field is optional.
///
/// Serialized with the same camelCase names as `SessionData`, omitting
/// absent fields, so a patch reads like the partial object it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_screen_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distraction_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_attempts: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps: Option<Vec<TrackedApp>>,
}

impl SessionPatch {
    /// Creates a patch that replaces only the app list.
    pub fn apps(apps: Vec<TrackedApp>) -> Self {
        Self {
            apps: Some(apps),
            ..Self::default()
        }
    }

    /// Returns true if the patch sets no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_screen_time.is_none()
            && self.focus_time.is_none()
            && self.distraction_time.is_none()
            && self.blocked_attempts.is_none()
            && self.apps.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_totals() {
        let data = SessionData::sample();
        assert_eq!(data.total_screen_time, 205);
        assert_eq!(data.focus_time, 120);
        assert_eq!(data.distraction_time, 85);
        assert_eq!(data.blocked_attempts, 12);
        assert_eq!(data.apps.len(), 4);
        assert_eq!(data.blocked_count(), 2);
    }

    #[test]
    fn test_merge_leaves_absent_fields_untouched() {
        let data = SessionData::sample();
        let patch = SessionPatch {
            focus_time: Some(300),
            ..SessionPatch::default()
        };

        let merged = data.merge(&patch);

        assert_eq!(merged.focus_time, 300);
        assert_eq!(merged.total_screen_time, data.total_screen_time);
        assert_eq!(merged.distraction_time, data.distraction_time);
        assert_eq!(merged.blocked_attempts, data.blocked_attempts);
        assert_eq!(merged.apps, data.apps);
    }

    #[test]
    fn test_merge_replaces_whole_app_list() {
        let data = SessionData::sample();
        let replacement: Vec<TrackedApp> = data.apps.iter().take(1).cloned().collect();

        let merged = data.merge(&SessionPatch::apps(replacement.clone()));

        assert_eq!(merged.apps, replacement);
        assert_eq!(merged.focus_time, data.focus_time);
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let data = SessionData::sample();
        assert_eq!(data.merge(&SessionPatch::default()), data);
    }

    #[test]
    fn test_merge_all_fields() {
        let data = SessionData::sample();
        let patch = SessionPatch {
            total_screen_time: Some(1),
            focus_time: Some(2),
            distraction_time: Some(3),
            blocked_attempts: Some(4),
            apps: Some(Vec::new()),
        };

        let merged = data.merge(&patch);

        assert_eq!(merged, SessionData {
            total_screen_time: 1,
            focus_time: 2,
            distraction_time: 3,
            blocked_attempts: 4,
            apps: Vec::new(),
        });
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(SessionPatch::default().is_empty());
        assert!(!SessionPatch::apps(Vec::new()).is_empty());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = SessionPatch {
            focus_time: Some(10),
            ..SessionPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"focusTime":10}"#);
    }

    #[test]
    fn test_session_data_reads_camel_case_json() {
        let json = r#"{
            "totalScreenTime": 10,
            "focusTime": 5,
            "distractionTime": 5,
            "blockedAttempts": 1,
            "apps": [{
                "id": "1", "name": "Social Media", "icon": "📱",
                "timeLimit": 30, "timeUsed": 45, "isBlocked": true,
                "category": "Social"
            }]
        }"#;
        let data: SessionData = serde_json::from_str(json).unwrap();
        assert_eq!(data.total_screen_time, 10);
        assert_eq!(data.apps.len(), 1);
        assert_eq!(data.app(&AppId::new("1")).map(|a| a.time_used), Some(45));
    }
}

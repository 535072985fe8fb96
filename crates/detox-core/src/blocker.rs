//! App blocker operations.
//!
//! Each operation reads the current snapshot and returns a
//! [`SessionPatch`] that replaces the whole app list. The caller applies
//! it through the store.

use crate::error::{DomainError, DomainResult};
use crate::metrics::parse_or_zero;
use crate::model::{AppId, NewApp, TrackedApp, APP_CATEGORIES, APP_ICONS, DEFAULT_TIME_LIMIT};
use crate::session::{SessionData, SessionPatch};
use chrono::{DateTime, Utc};

// ============================================================================
// Operations
// ============================================================================

/// Appends a new app with zero usage, unblocked, under a fresh identifier.
///
/// Fails with [`DomainError::EmptyAppName`] when the name is blank.
pub fn add_app(data: &SessionData, new_app: NewApp, now: DateTime<Utc>) -> DomainResult<SessionPatch> {
    if new_app.name.trim().is_empty() {
        return Err(DomainError::EmptyAppName);
    }

    let app = TrackedApp {
        id: AppId::generate(&data.apps, now),
        name: new_app.name,
        icon: new_app.icon,
        time_limit: new_app.time_limit,
        time_used: 0,
        is_blocked: false,
        category: new_app.category,
    };

    let mut apps = data.apps.clone();
    apps.push(app);
    Ok(SessionPatch::apps(apps))
}

/// Drops the app with the given identifier, keeping the others in order.
pub fn remove_app(data: &SessionData, id: &AppId) -> DomainResult<SessionPatch> {
    ensure_exists(data, id)?;
    let apps = data.apps.iter().filter(|app| &app.id != id).cloned().collect();
    Ok(SessionPatch::apps(apps))
}

/// Flips the block flag of one app.
pub fn toggle_block(data: &SessionData, id: &AppId) -> DomainResult<SessionPatch> {
    map_app(data, id, |app| TrackedApp {
        is_blocked: !app.is_blocked,
        ..app.clone()
    })
}

/// Sets the daily limit of one app. Any integer is accepted.
pub fn update_time_limit(data: &SessionData, id: &AppId, time_limit: i64) -> DomainResult<SessionPatch> {
    map_app(data, id, |app| TrackedApp {
        time_limit,
        ..app.clone()
    })
}

fn ensure_exists(data: &SessionData, id: &AppId) -> DomainResult<()> {
    match data.app(id) {
        Some(_) => Ok(()),
        None => Err(DomainError::AppNotFound { app_id: id.clone() }),
    }
}

fn map_app<F>(data: &SessionData, id: &AppId, f: F) -> DomainResult<SessionPatch>
where
    F: Fn(&TrackedApp) -> TrackedApp,
{
    ensure_exists(data, id)?;
    let apps = data
        .apps
        .iter()
        .map(|app| if &app.id == id { f(app) } else { app.clone() })
        .collect();
    Ok(SessionPatch::apps(apps))
}

// ============================================================================
// Summary
// ============================================================================

/// Header statistics of the blocker view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockerSummary {
    pub tracked_apps: usize,
    pub currently_blocked: usize,
    pub blocked_attempts: u64,
}

impl BlockerSummary {
    pub fn of(data: &SessionData) -> Self {
        Self {
            tracked_apps: data.apps.len(),
            currently_blocked: data.blocked_count(),
            blocked_attempts: data.blocked_attempts,
        }
    }
}

// ============================================================================
// Add-App Form
// ============================================================================

/// Field of the add-app form that currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Icon,
    Category,
    TimeLimit,
}

impl FormField {
    /// Returns the next field, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Icon,
            Self::Icon => Self::Category,
            Self::Category => Self::TimeLimit,
            Self::TimeLimit => Self::Name,
        }
    }
}

/// Editing state of the add-app form.
///
/// Text fields are kept as raw input so that the time limit follows the
/// default-on-parse-failure convention when submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppForm {
    pub name: String,
    pub time_limit: String,
    pub focused: FormField,
    icon_index: usize,
    category_index: usize,
}

impl Default for NewAppForm {
    fn default() -> Self {
        let category_index = APP_CATEGORIES
            .iter()
            .position(|c| *c == crate::model::DEFAULT_CATEGORY)
            .unwrap_or(0);
        Self {
            name: String::new(),
            time_limit: DEFAULT_TIME_LIMIT.to_string(),
            focused: FormField::Name,
            icon_index: 0,
            category_index,
        }
    }
}

impl NewAppForm {
    /// Returns the selected icon glyph.
    pub fn icon(&self) -> &'static str {
        APP_ICONS.get(self.icon_index).copied().unwrap_or("📱")
    }

    /// Returns the selected category.
    pub fn category(&self) -> &'static str {
        APP_CATEGORIES.get(self.category_index).copied().unwrap_or("Other")
    }

    /// Cycles the icon or category selection, depending on focus.
    pub fn cycle(&mut self, forward: bool) {
        match self.focused {
            FormField::Icon => self.icon_index = step(self.icon_index, APP_ICONS.len(), forward),
            FormField::Category => {
                self.category_index = step(self.category_index, APP_CATEGORIES.len(), forward)
            }
            FormField::Name | FormField::TimeLimit => {}
        }
    }

    /// Appends a typed character to the focused text field.
    pub fn push_char(&mut self, c: char) {
        match self.focused {
            FormField::Name => self.name.push(c),
            FormField::TimeLimit => self.time_limit.push(c),
            FormField::Icon | FormField::Category => {}
        }
    }

    /// Removes the last character of the focused text field.
    pub fn pop_char(&mut self) {
        match self.focused {
            FormField::Name => {
                self.name.pop();
            }
            FormField::TimeLimit => {
                self.time_limit.pop();
            }
            FormField::Icon | FormField::Category => {}
        }
    }

    /// Moves focus to the next field.
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    /// Builds the request this form currently describes.
    pub fn to_new_app(&self) -> NewApp {
        NewApp {
            name: self.name.clone(),
            icon: self.icon().to_string(),
            time_limit: parse_or_zero(&self.time_limit),
            category: self.category().to_string(),
        }
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        index.saturating_add(1) % len
    } else if index == 0 {
        len.saturating_sub(1)
    } else {
        index.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_add_app_appends_fresh_entry() {
        let data = SessionData::sample();
        let patch = add_app(&data, NewApp::named("X"), now()).unwrap();
        let merged = data.merge(&patch);

        assert_eq!(merged.apps.len(), data.apps.len() + 1);
        let added = merged.apps.last().unwrap();
        assert_eq!(added.name, "X");
        assert_eq!(added.time_used, 0);
        assert!(!added.is_blocked);
        assert!(data.apps.iter().all(|app| app.id != added.id));
    }

    #[test]
    fn test_add_app_rejects_blank_name() {
        let data = SessionData::sample();
        assert_eq!(
            add_app(&data, NewApp::named("   "), now()),
            Err(DomainError::EmptyAppName)
        );
    }

    #[test]
    fn test_add_app_twice_in_same_millisecond() {
        let data = SessionData::sample();
        let first = data.merge(&add_app(&data, NewApp::named("A"), now()).unwrap());
        let second = first.merge(&add_app(&first, NewApp::named("B"), now()).unwrap());

        let ids: Vec<&str> = second.apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "1700000000000", "1700000000001"]);
    }

    #[test]
    fn test_remove_app_preserves_order() {
        let data = SessionData::sample();
        let patch = remove_app(&data, &AppId::new("2")).unwrap();
        let merged = data.merge(&patch);

        let ids: Vec<&str> = merged.apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
        assert_eq!(merged.apps.first(), data.apps.first());
    }

    #[test]
    fn test_remove_unknown_app() {
        let data = SessionData::sample();
        let result = remove_app(&data, &AppId::new("missing"));
        assert!(matches!(result, Err(DomainError::AppNotFound { .. })));
    }

    #[test]
    fn test_toggle_block() {
        let data = SessionData::sample();
        let merged = data.merge(&toggle_block(&data, &AppId::new("2")).unwrap());
        assert_eq!(merged.app(&AppId::new("2")).map(|a| a.is_blocked), Some(true));
        assert_eq!(merged.app(&AppId::new("1")), data.app(&AppId::new("1")));
    }

    #[test]
    fn test_update_time_limit_accepts_any_integer() {
        let data = SessionData::sample();
        let merged = data.merge(&update_time_limit(&data, &AppId::new("4"), -5).unwrap());
        assert_eq!(merged.app(&AppId::new("4")).map(|a| a.time_limit), Some(-5));
    }

    #[test]
    fn test_summary() {
        let summary = BlockerSummary::of(&SessionData::sample());
        assert_eq!(summary, BlockerSummary {
            tracked_apps: 4,
            currently_blocked: 2,
            blocked_attempts: 12,
        });
    }

    #[test]
    fn test_form_defaults() {
        let form = NewAppForm::default();
        assert_eq!(form.icon(), "📱");
        assert_eq!(form.category(), "Other");
        assert_eq!(form.to_new_app().time_limit, 30);
    }

    #[test]
    fn test_form_invalid_limit_falls_back_to_zero() {
        let mut form = NewAppForm::default();
        form.focused = FormField::TimeLimit;
        form.pop_char();
        form.pop_char();
        form.push_char('x');
        assert_eq!(form.to_new_app().time_limit, 0);
    }

    #[test]
    fn test_form_cycles_category_with_wrap() {
        let mut form = NewAppForm::default();
        form.focused = FormField::Category;
        form.cycle(true);
        assert_eq!(form.category(), "Social");
        form.cycle(false);
        assert_eq!(form.category(), "Other");
    }

    #[test]
    fn test_form_typing_only_hits_text_fields() {
        let mut form = NewAppForm::default();
        form.push_char('Y');
        form.focus_next();
        form.push_char('Z');
        assert_eq!(form.name, "Y");
        assert_eq!(form.focused, FormField::Icon);
    }
}

//! Application state machine for the Detox TUI.
//!
//! This module defines the state behind every view: the session store,
//! the stopwatch, the settings toggles, the onboarding walkthrough and the
//! modal editing states. Views read from it; key handling mutates it.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

use chrono::{DateTime, Utc};
use detox_core::{
    blocker, parse_or_zero, AppId, DomainError, NewAppForm, Onboarding, SessionData,
    SessionKind, SettingToggle, SettingsState, Store, TimeTracker, TrackedApp,
};
use tracing::{debug, info};

// ============================================================================
// Views and Modes
// ============================================================================

/// Top-level tab shown below the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Blocker,
    Tracker,
    Settings,
}

impl View {
    /// All views in tab order.
    pub const ALL: [View; 4] = [Self::Dashboard, Self::Blocker, Self::Tracker, Self::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Blocker => "App Blocker",
            Self::Tracker => "Time Tracker",
            Self::Settings => "Settings",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        let index = self.position().saturating_add(1) % Self::ALL.len();
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let index = match self.position() {
            0 => Self::ALL.len().saturating_sub(1),
            i => i.saturating_sub(1),
        };
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

/// Modal input state. Anything other than `Normal` captures the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Filling in the add-app form.
    AddApp(NewAppForm),
    /// Editing the daily limit of one app.
    EditLimit { id: AppId, input: String },
    /// Editing the tracker's daily goal.
    EditGoal { input: String },
    /// Waiting for the user to confirm clearing all data.
    ConfirmClear,
}

/// Rows of the settings view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Toggle(SettingToggle),
    ExportData,
    ClearData,
    ResetOnboarding,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 7] = [
        Self::Toggle(SettingToggle::Notifications),
        Self::Toggle(SettingToggle::DarkMode),
        Self::Toggle(SettingToggle::AutoBlock),
        Self::Toggle(SettingToggle::FocusMode),
        Self::ExportData,
        Self::ClearData,
        Self::ResetOnboarding,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle(toggle) => toggle.label(),
            Self::ExportData => "Export Data",
            Self::ClearData => "Clear All Data",
            Self::ResetOnboarding => "Show Onboarding",
        }
    }
}

// ============================================================================
// Application
// ============================================================================

/// Core application state for the Detox TUI.
#[derive(Debug, Clone)]
pub struct App {
    /// Single source of truth for session data.
    pub store: Store,

    /// Currently visible tab.
    pub view: View,

    /// Modal input state.
    pub mode: Mode,

    /// Stopwatch and daily goal of the tracker view.
    pub tracker: TimeTracker,

    /// Local settings toggles.
    pub settings: SettingsState,

    /// Walkthrough position while onboarding is shown.
    pub onboarding: Option<Onboarding>,

    /// Selected row in the app list (dashboard and blocker).
    pub selected_app: usize,

    /// Selected row in the settings view.
    pub selected_setting: usize,

    /// One-line feedback shown in the footer.
    pub status_message: Option<String>,

    /// Flag indicating the application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app around loaded session data.
    pub fn new(data: SessionData, daily_goal: i64, show_onboarding: bool) -> Self {
        Self {
            store: Store::new(data),
            view: View::Dashboard,
            mode: Mode::Normal,
            tracker: TimeTracker::new(daily_goal),
            settings: SettingsState::default(),
            onboarding: show_onboarding.then(Onboarding::new),
            selected_app: 0,
            selected_setting: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Returns the current session snapshot.
    pub fn data(&self) -> &SessionData {
        self.store.data()
    }

    /// Sets the quit flag to true, signaling the application should exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Drops the footer message once it has been seen.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn apply(&mut self, patch: &detox_core::SessionPatch) {
        self.store.apply(patch);
        self.clamp_selection();
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn previous_view(&mut self) {
        self.view = self.view.previous();
    }

    /// Returns the currently selected app, if any.
    pub fn selected_app(&self) -> Option<&TrackedApp> {
        self.data().apps.get(self.selected_app)
    }

    /// Navigates to the next app, wrapping around if needed.
    pub fn select_next_app(&mut self) {
        let count = self.data().apps.len();
        if count == 0 {
            self.selected_app = 0;
            return;
        }
        self.selected_app = self.selected_app.saturating_add(1) % count;
    }

    /// Navigates to the previous app, wrapping around if needed.
    pub fn select_previous_app(&mut self) {
        let count = self.data().apps.len();
        if count == 0 {
            self.selected_app = 0;
        } else if self.selected_app == 0 {
            self.selected_app = count.saturating_sub(1);
        } else {
            self.selected_app = self.selected_app.saturating_sub(1);
        }
    }

    /// Clamps the app selection to the current list length.
    fn clamp_selection(&mut self) {
        let count = self.data().apps.len();
        if count == 0 {
            self.selected_app = 0;
        } else if self.selected_app >= count {
            self.selected_app = count.saturating_sub(1);
        }
    }

    pub fn select_next_setting(&mut self) {
        self.selected_setting = self.selected_setting.saturating_add(1) % SettingsItem::ALL.len();
    }

    pub fn select_previous_setting(&mut self) {
        self.selected_setting = match self.selected_setting {
            0 => SettingsItem::ALL.len().saturating_sub(1),
            i => i.saturating_sub(1),
        };
    }

    pub fn selected_setting(&self) -> Option<SettingsItem> {
        SettingsItem::ALL.get(self.selected_setting).copied()
    }

    // ------------------------------------------------------------------------
    // App Blocker
    // ------------------------------------------------------------------------

    /// Opens the add-app form.
    pub fn begin_add_app(&mut self) {
        self.mode = Mode::AddApp(NewAppForm::default());
    }

    /// Submits the add-app form.
    ///
    /// A blank name keeps the form open, mirroring a disabled submit button.
    pub fn submit_add_app(&mut self, now: DateTime<Utc>) {
        let Mode::AddApp(form) = &self.mode else {
            return;
        };
        match blocker::add_app(self.data(), form.to_new_app(), now) {
            Ok(patch) => {
                self.apply(&patch);
                self.selected_app = self.data().apps.len().saturating_sub(1);
                self.mode = Mode::Normal;
                if let Some(app) = self.selected_app() {
                    info!(app_id = %app.id, name = %app.name, "App added");
                    let message = format!("Added {}", app.name);
                    self.set_status(message);
                }
            }
            Err(DomainError::EmptyAppName) => self.set_status("Enter an app name first"),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Removes the selected app.
    pub fn remove_selected_app(&mut self) {
        let Some(id) = self.selected_app().map(|app| app.id.clone()) else {
            return;
        };
        match blocker::remove_app(self.data(), &id) {
            Ok(patch) => {
                self.apply(&patch);
                info!(app_id = %id, "App removed");
            }
            Err(e) => debug!(error = %e, "Remove ignored"),
        }
    }

    /// Flips the block flag of the selected app.
    pub fn toggle_selected_block(&mut self) {
        let Some(id) = self.selected_app().map(|app| app.id.clone()) else {
            return;
        };
        match blocker::toggle_block(self.data(), &id) {
            Ok(patch) => self.apply(&patch),
            Err(e) => debug!(error = %e, "Toggle ignored"),
        }
    }

    /// Opens the limit editor for the selected app.
    pub fn begin_edit_limit(&mut self) {
        if let Some(app) = self.selected_app() {
            self.mode = Mode::EditLimit {
                id: app.id.clone(),
                input: app.time_limit.to_string(),
            };
        }
    }

    /// Commits the limit editor. Invalid input becomes zero.
    pub fn commit_edit_limit(&mut self) {
        let Mode::EditLimit { id, input } = std::mem::take(&mut self.mode) else {
            return;
        };
        let limit: i64 = parse_or_zero(&input);
        match blocker::update_time_limit(self.data(), &id, limit) {
            Ok(patch) => {
                self.apply(&patch);
                debug!(app_id = %id, limit, "Time limit updated");
            }
            Err(e) => debug!(error = %e, "Limit update ignored"),
        }
    }

    // ------------------------------------------------------------------------
    // Time Tracker
    // ------------------------------------------------------------------------

    /// Starts the stopwatch, or pauses it if running.
    pub fn toggle_tracking(&mut self) {
        if self.tracker.is_running() {
            self.tracker.pause();
        } else {
            self.tracker.start();
        }
    }

    /// Stops the stopwatch and commits focus minutes.
    pub fn stop_tracking(&mut self) {
        let snapshot = self.store.snapshot();
        if let Some(patch) = self.tracker.stop(&snapshot) {
            self.apply(&patch);
        }
    }

    /// Switches between focus and break sessions.
    pub fn toggle_session_kind(&mut self) {
        let kind: SessionKind = self.tracker.kind().toggled();
        self.tracker.set_kind(kind);
    }

    pub fn begin_edit_goal(&mut self) {
        self.mode = Mode::EditGoal {
            input: self.tracker.daily_goal().to_string(),
        };
    }

    /// Commits the goal editor. Invalid input becomes zero.
    pub fn commit_edit_goal(&mut self) {
        if let Mode::EditGoal { input } = std::mem::take(&mut self.mode) {
            self.tracker.set_daily_goal_input(&input);
        }
    }

    /// Advances the stopwatch by one second.
    pub fn on_second_tick(&mut self) {
        self.tracker.tick();
    }

    // ------------------------------------------------------------------------
    // Onboarding and Settings
    // ------------------------------------------------------------------------

    pub fn is_onboarding(&self) -> bool {
        self.onboarding.is_some()
    }

    /// Hides the walkthrough.
    pub fn finish_onboarding(&mut self) {
        self.onboarding = None;
    }

    /// Shows the walkthrough again from the first step.
    pub fn reset_onboarding(&mut self) {
        self.onboarding = Some(Onboarding::new());
    }

    pub fn toggle_setting(&mut self, toggle: SettingToggle) {
        self.settings.toggle(toggle);
    }

    /// Reinitializes everything after stored data was cleared.
    pub fn reset_after_clear(&mut self, data: SessionData) {
        self.store.replace(data);
        self.tracker = TimeTracker::new(self.tracker.daily_goal());
        self.settings = SettingsState::default();
        self.mode = Mode::Normal;
        self.view = View::Dashboard;
        self.selected_app = 0;
        self.selected_setting = 0;
        self.onboarding = Some(Onboarding::new());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_app() -> App {
        App::new(SessionData::sample(), 120, false)
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_new_app_defaults() {
        let app = sample_app();
        assert_eq!(app.view, View::Dashboard);
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.is_onboarding());
        assert!(!app.should_quit);
        assert_eq!(app.store.revision(), 0);
    }

    #[test]
    fn test_new_app_with_onboarding() {
        let app = App::new(SessionData::sample(), 120, true);
        assert!(app.is_onboarding());
    }

    #[test]
    fn test_view_cycle_wraps() {
        assert_eq!(View::Settings.next(), View::Dashboard);
        assert_eq!(View::Dashboard.previous(), View::Settings);
        assert_eq!(View::Blocker.next(), View::Tracker);
    }

    #[test]
    fn test_select_app_wraps_around() {
        let mut app = sample_app();
        app.select_previous_app();
        assert_eq!(app.selected_app, 3);
        app.select_next_app();
        assert_eq!(app.selected_app, 0);
    }

    #[test]
    fn test_add_app_selects_new_entry() {
        let mut app = sample_app();
        app.begin_add_app();
        if let Mode::AddApp(form) = &mut app.mode {
            form.name = "Reddit".to_string();
        }

        app.submit_add_app(now());

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.data().apps.len(), 5);
        assert_eq!(app.selected_app().map(|a| a.name.as_str()), Some("Reddit"));
        assert_eq!(app.store.revision(), 1);
    }

    #[test]
    fn test_add_app_with_blank_name_keeps_form_open() {
        let mut app = sample_app();
        app.begin_add_app();
        app.submit_add_app(now());

        assert!(matches!(app.mode, Mode::AddApp(_)));
        assert_eq!(app.data().apps.len(), 4);
        assert_eq!(app.store.revision(), 0);
    }

    #[test]
    fn test_remove_last_app_clamps_selection() {
        let mut app = sample_app();
        app.selected_app = 3;
        app.remove_selected_app();
        assert_eq!(app.data().apps.len(), 3);
        assert_eq!(app.selected_app, 2);
    }

    #[test]
    fn test_remove_with_no_apps_is_noop() {
        let mut app = App::new(SessionData::default(), 120, false);
        app.remove_selected_app();
        assert_eq!(app.store.revision(), 0);
    }

    #[test]
    fn test_toggle_selected_block() {
        let mut app = sample_app();
        app.selected_app = 1;
        app.toggle_selected_block();
        assert_eq!(app.selected_app().map(|a| a.is_blocked), Some(true));
    }

    #[test]
    fn test_edit_limit_invalid_input_becomes_zero() {
        let mut app = sample_app();
        app.begin_edit_limit();
        if let Mode::EditLimit { input, .. } = &mut app.mode {
            *input = "forty".to_string();
        }
        app.commit_edit_limit();

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.selected_app().map(|a| a.time_limit), Some(0));
    }

    #[test]
    fn test_edit_limit_starts_with_current_value() {
        let mut app = sample_app();
        app.begin_edit_limit();
        assert_eq!(
            app.mode,
            Mode::EditLimit { id: AppId::new("1"), input: "30".to_string() }
        );
    }

    #[test]
    fn test_focus_session_commits_minutes() {
        let mut app = sample_app();
        app.toggle_tracking();
        for _ in 0..120 {
            app.on_second_tick();
        }
        app.stop_tracking();

        assert_eq!(app.data().focus_time, 122);
        assert_eq!(app.data().total_screen_time, 207);
        assert_eq!(app.tracker.elapsed_seconds(), 0);
    }

    #[test]
    fn test_break_session_commits_nothing() {
        let mut app = sample_app();
        app.toggle_session_kind();
        app.toggle_tracking();
        for _ in 0..120 {
            app.on_second_tick();
        }
        app.stop_tracking();

        assert_eq!(app.data().focus_time, 120);
        assert_eq!(app.store.revision(), 0);
    }

    #[test]
    fn test_toggle_tracking_pauses() {
        let mut app = sample_app();
        app.toggle_tracking();
        app.on_second_tick();
        app.toggle_tracking();
        app.on_second_tick();
        assert_eq!(app.tracker.elapsed_seconds(), 1);
        assert!(!app.tracker.is_running());
    }

    #[test]
    fn test_edit_goal() {
        let mut app = sample_app();
        app.begin_edit_goal();
        if let Mode::EditGoal { input } = &mut app.mode {
            *input = "240".to_string();
        }
        app.commit_edit_goal();
        assert_eq!(app.tracker.daily_goal(), 240);
    }

    #[test]
    fn test_settings_selection_wraps() {
        let mut app = sample_app();
        app.select_previous_setting();
        assert_eq!(app.selected_setting(), Some(SettingsItem::ResetOnboarding));
        app.select_next_setting();
        assert_eq!(
            app.selected_setting(),
            Some(SettingsItem::Toggle(SettingToggle::Notifications))
        );
    }

    #[test]
    fn test_reset_after_clear() {
        let mut app = sample_app();
        app.view = View::Settings;
        app.toggle_setting(SettingToggle::DarkMode);
        app.store.apply(&detox_core::SessionPatch::apps(Vec::new()));

        app.reset_after_clear(SessionData::sample());

        assert_eq!(app.data(), &SessionData::sample());
        assert_eq!(app.view, View::Dashboard);
        assert!(app.is_onboarding());
        assert!(!app.settings.dark_mode);
    }
}

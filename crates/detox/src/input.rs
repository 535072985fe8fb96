//! Keyboard input handling for the Detox TUI.
//!
//! This module provides event types and handlers for keyboard input,
//! terminal resizing, and the one-second stopwatch tick.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

use crate::app::{App, Mode, SettingsItem, View};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Event Types
// ============================================================================

/// Events that the TUI can receive and process.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input from the user.
    Key(KeyEvent),

    /// Terminal window resize event.
    Resize(u16, u16),

    /// One second of wall time has passed.
    Tick,
}

// ============================================================================
// Action Types
// ============================================================================

/// Actions that need the main loop, usually because they touch storage
/// beyond the session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action required.
    None,

    /// Quit the application.
    Quit,

    /// Persist the onboarding-completed flag.
    CompleteOnboarding,

    /// Write the export file.
    ExportData,

    /// Delete stored data and start over.
    ClearData,
}

// ============================================================================
// Input Handler
// ============================================================================

/// Handles a keyboard event and updates application state accordingly.
///
/// Modal states take the keyboard first: the onboarding walkthrough, then
/// any open editor or confirmation. Otherwise global keys are tried before
/// the keys of the current view.
///
/// # Key Bindings
///
/// | Key                 | Action                              |
/// |---------------------|-------------------------------------|
/// | `q`, `Esc`          | Quit the application                |
/// | `Ctrl+C`            | Quit the application (always)       |
/// | `Tab`, `l`, `Right` | Next view                           |
/// | `BackTab`, `h`, `Left` | Previous view                    |
/// | `1`-`4`             | Jump to a view                      |
/// | `j`/`k`, `Down`/`Up`| Move the selection                  |
///
/// App Blocker: `a` add, `d`/`Delete` remove, `b`/`Space` block, `e` edit
/// limit. Time Tracker: `Space` start/pause, `s` stop, `f` focus/break,
/// `g` edit goal. Settings: `Enter`/`Space` activate the selected row.
#[must_use]
pub fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    // Handle Ctrl+C specially as an unconditional quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Action::Quit;
    }

    app.clear_status();

    if app.is_onboarding() {
        return handle_onboarding_key(key, app);
    }

    match app.mode {
        Mode::Normal => {}
        Mode::AddApp(_) => return handle_form_key(key, app),
        Mode::EditLimit { .. } | Mode::EditGoal { .. } => return handle_number_key(key, app),
        Mode::ConfirmClear => return handle_confirm_key(key, app),
    }

    if let Some(action) = handle_global_key(key, app) {
        return action;
    }

    match app.view {
        View::Dashboard => handle_list_key(key, app),
        View::Blocker => handle_blocker_key(key, app),
        View::Tracker => handle_tracker_key(key, app),
        View::Settings => handle_settings_key(key, app),
    }
}

fn handle_global_key(key: KeyEvent, app: &mut App) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.quit();
            Some(Action::Quit)
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            app.next_view();
            Some(Action::None)
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            app.previous_view();
            Some(Action::None)
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
            if let Some(view) = index.and_then(|i| View::ALL.get(i.saturating_sub(1))) {
                app.view = *view;
            }
            Some(Action::None)
        }
        _ => None,
    }
}

fn handle_onboarding_key(key: KeyEvent, app: &mut App) -> Action {
    let Some(onboarding) = app.onboarding.as_mut() else {
        return Action::None;
    };
    match key.code {
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char(' ') => {
            if onboarding.advance() {
                app.finish_onboarding();
                Action::CompleteOnboarding
            } else {
                Action::None
            }
        }
        KeyCode::Left | KeyCode::Char('p') => {
            onboarding.back();
            Action::None
        }
        KeyCode::Char('s') | KeyCode::Esc => {
            app.finish_onboarding();
            Action::CompleteOnboarding
        }
        KeyCode::Char('q') => {
            app.quit();
            Action::Quit
        }
        _ => Action::None,
    }
}

fn handle_list_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_app(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_app(),
        _ => {}
    }
    Action::None
}

fn handle_blocker_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Char('a') => app.begin_add_app(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_app(),
        KeyCode::Char('b') | KeyCode::Char(' ') => app.toggle_selected_block(),
        KeyCode::Char('e') => app.begin_edit_limit(),
        _ => return handle_list_key(key, app),
    }
    Action::None
}

fn handle_tracker_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Char(' ') => app.toggle_tracking(),
        KeyCode::Char('s') => app.stop_tracking(),
        KeyCode::Char('f') => app.toggle_session_kind(),
        KeyCode::Char('g') => app.begin_edit_goal(),
        _ => {}
    }
    Action::None
}

fn handle_settings_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_setting(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_setting(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            return match app.selected_setting() {
                Some(SettingsItem::Toggle(toggle)) => {
                    app.toggle_setting(toggle);
                    Action::None
                }
                Some(SettingsItem::ExportData) => Action::ExportData,
                Some(SettingsItem::ClearData) => {
                    app.mode = Mode::ConfirmClear;
                    Action::None
                }
                Some(SettingsItem::ResetOnboarding) => {
                    app.reset_onboarding();
                    Action::None
                }
                None => Action::None,
            };
        }
        _ => {}
    }
    Action::None
}

fn handle_form_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Enter => app.submit_add_app(Utc::now()),
        KeyCode::Tab => with_form(app, |form| form.focus_next()),
        KeyCode::Left => with_form(app, |form| form.cycle(false)),
        KeyCode::Right => with_form(app, |form| form.cycle(true)),
        KeyCode::Backspace => with_form(app, |form| form.pop_char()),
        KeyCode::Char(c) => with_form(app, |form| form.push_char(c)),
        _ => {}
    }
    Action::None
}

fn with_form(app: &mut App, f: impl FnOnce(&mut detox_core::NewAppForm)) {
    if let Mode::AddApp(form) = &mut app.mode {
        f(form);
    }
}

fn handle_number_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Enter => match app.mode {
            Mode::EditLimit { .. } => app.commit_edit_limit(),
            Mode::EditGoal { .. } => app.commit_edit_goal(),
            _ => {}
        },
        KeyCode::Backspace => {
            if let Mode::EditLimit { input, .. } | Mode::EditGoal { input } = &mut app.mode {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Mode::EditLimit { input, .. } | Mode::EditGoal { input } = &mut app.mode {
                input.push(c);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_confirm_key(key: KeyEvent, app: &mut App) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.mode = Mode::Normal;
            Action::ClearData
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.mode = Mode::Normal;
            Action::None
        }
        _ => Action::None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use detox_core::{FormField, SessionData, SettingToggle};

    /// Creates a test KeyEvent with no modifiers.
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key_event(key_event(code), app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            let _ = press(app, KeyCode::Char(c));
        }
    }

    fn test_app() -> App {
        App::new(SessionData::sample(), 120, false)
    }

    // ------------------------------------------------------------------------
    // Quit key tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_q_quits() {
        let mut app = test_app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = test_app();
        assert_eq!(press(&mut app, KeyCode::Esc), Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_inside_form() {
        let mut app = test_app();
        app.begin_add_app();
        let action = handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert_eq!(action, Action::Quit);
        assert!(app.should_quit);
    }

    // ------------------------------------------------------------------------
    // View navigation tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_tab_cycles_views() {
        let mut app = test_app();
        let _ = press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Blocker);
        let _ = press(&mut app, KeyCode::BackTab);
        let _ = press(&mut app, KeyCode::BackTab);
        assert_eq!(app.view, View::Settings);
    }

    #[test]
    fn test_number_keys_jump_to_view() {
        let mut app = test_app();
        let _ = press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view, View::Tracker);
        let _ = press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn test_j_selects_next_app() {
        let mut app = test_app();
        assert_eq!(press(&mut app, KeyCode::Char('j')), Action::None);
        assert_eq!(app.selected_app, 1);
        let _ = press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_app, 0);
    }

    // ------------------------------------------------------------------------
    // Onboarding tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_onboarding_walkthrough_completes() {
        let mut app = App::new(SessionData::sample(), 120, true);
        for _ in 0..3 {
            assert_eq!(press(&mut app, KeyCode::Enter), Action::None);
        }
        assert_eq!(press(&mut app, KeyCode::Enter), Action::CompleteOnboarding);
        assert!(!app.is_onboarding());
    }

    #[test]
    fn test_onboarding_back_and_skip() {
        let mut app = App::new(SessionData::sample(), 120, true);
        let _ = press(&mut app, KeyCode::Right);
        let _ = press(&mut app, KeyCode::Left);
        assert_eq!(app.onboarding.map(|o| o.index()), Some(0));

        assert_eq!(press(&mut app, KeyCode::Char('s')), Action::CompleteOnboarding);
        assert!(!app.is_onboarding());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_onboarding_captures_view_keys() {
        let mut app = App::new(SessionData::sample(), 120, true);
        let _ = press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Dashboard);
    }

    // ------------------------------------------------------------------------
    // App Blocker tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_app_through_form() {
        let mut app = test_app();
        app.view = View::Blocker;

        let _ = press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Reddit");
        let _ = press(&mut app, KeyCode::Tab);
        let _ = press(&mut app, KeyCode::Right);
        let _ = press(&mut app, KeyCode::Tab);
        let _ = press(&mut app, KeyCode::Tab);
        let _ = press(&mut app, KeyCode::Backspace);
        let _ = press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "45");
        let _ = press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        let added = app.selected_app().unwrap();
        assert_eq!(added.name, "Reddit");
        assert_eq!(added.time_limit, 45);
        assert_eq!(added.icon, "📺");
        assert!(!added.is_blocked);
    }

    #[test]
    fn test_form_keys_do_not_quit() {
        let mut app = test_app();
        app.view = View::Blocker;
        let _ = press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        if let Mode::AddApp(form) = &app.mode {
            assert_eq!(form.name, "q");
            assert_eq!(form.focused, FormField::Name);
        } else {
            panic!("expected add-app form");
        }
        let _ = press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.data().apps.len(), 4);
    }

    #[test]
    fn test_block_and_remove_keys() {
        let mut app = test_app();
        app.view = View::Blocker;
        app.selected_app = 1;

        let _ = press(&mut app, KeyCode::Char('b'));
        assert!(app.selected_app().unwrap().is_blocked);

        let _ = press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.data().apps.len(), 3);
    }

    #[test]
    fn test_edit_limit_keys() {
        let mut app = test_app();
        app.view = View::Blocker;
        let _ = press(&mut app, KeyCode::Char('e'));
        let _ = press(&mut app, KeyCode::Backspace);
        let _ = press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "90");
        let _ = press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_app().unwrap().time_limit, 90);
    }

    #[test]
    fn test_blocker_keys_inactive_on_dashboard() {
        let mut app = test_app();
        let _ = press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.data().apps.len(), 4);
    }

    // ------------------------------------------------------------------------
    // Time Tracker tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_tracker_keys() {
        let mut app = test_app();
        app.view = View::Tracker;

        let _ = press(&mut app, KeyCode::Char(' '));
        assert!(app.tracker.is_running());
        for _ in 0..60 {
            app.on_second_tick();
        }
        let _ = press(&mut app, KeyCode::Char('s'));
        assert!(!app.tracker.is_running());
        assert_eq!(app.data().focus_time, 121);
    }

    #[test]
    fn test_goal_editor() {
        let mut app = test_app();
        app.view = View::Tracker;
        let _ = press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "0");
        let _ = press(&mut app, KeyCode::Enter);
        assert_eq!(app.tracker.daily_goal(), 1200);
    }

    // ------------------------------------------------------------------------
    // Settings tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_settings_toggle() {
        let mut app = test_app();
        app.view = View::Settings;
        let _ = press(&mut app, KeyCode::Down);
        let _ = press(&mut app, KeyCode::Enter);
        assert!(app.settings.get(SettingToggle::DarkMode));
    }

    #[test]
    fn test_settings_export_returns_action() {
        let mut app = test_app();
        app.view = View::Settings;
        app.selected_setting = 4;
        assert_eq!(press(&mut app, KeyCode::Enter), Action::ExportData);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut app = test_app();
        app.view = View::Settings;
        app.selected_setting = 5;

        assert_eq!(press(&mut app, KeyCode::Enter), Action::None);
        assert_eq!(app.mode, Mode::ConfirmClear);
        assert_eq!(press(&mut app, KeyCode::Char('n')), Action::None);
        assert_eq!(app.mode, Mode::Normal);

        let _ = press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, KeyCode::Char('y')), Action::ClearData);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_reset_onboarding_from_settings() {
        let mut app = test_app();
        app.view = View::Settings;
        app.selected_setting = 6;
        let _ = press(&mut app, KeyCode::Char(' '));
        assert!(app.is_onboarding());
    }

    // ------------------------------------------------------------------------
    // Status message tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_status_message_cleared_by_next_key() {
        let mut app = test_app();
        app.view = View::Blocker;
        let _ = press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Reddit");
        let _ = press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message.as_deref(), Some("Added Reddit"));

        let _ = press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_status_message_cleared_by_view_change() {
        let mut app = test_app();
        app.set_status("Exported to /tmp/brain-detox-data.json");
        let _ = press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Blocker);
        assert!(app.status_message.is_none());
    }

    // ------------------------------------------------------------------------
    // Unhandled key tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_unhandled_key_returns_none() {
        let mut app = test_app();
        assert_eq!(press(&mut app, KeyCode::Char('x')), Action::None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_event_resize_variant() {
        let event = Event::Resize(80, 24);
        match event {
            Event::Resize(w, h) => {
                assert_eq!(w, 80);
                assert_eq!(h, 24);
            }
            _ => panic!("Expected Resize event"),
        }
    }
}

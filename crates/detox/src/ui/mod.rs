//! UI rendering module for the Detox TUI.
//!
//! This module provides the complete rendering pipeline. It orchestrates
//! the layout, the current view and any open dialog.
//!
//! # Layout Structure
//!
//! ```text
//! +--------------------------------------------------+
//! |  Header: Title and view tabs                     |  <- 3 lines
//! +--------------------------------------------------+
//! |  Dashboard | App Blocker | Time Tracker |        |  <- fills remaining
//! |  Settings, or the onboarding walkthrough         |
//! +--------------------------------------------------+
//! |  Footer: Keybinding hints                        |  <- 3 lines
//! +--------------------------------------------------+
//! ```
//!
//! Dialogs (add app, edit limit, edit goal, confirm clear) are drawn
//! centered over the content area.

pub mod blocker;
pub mod dashboard;
pub mod dialog;
pub mod layout;
pub mod onboarding;
pub mod settings;
pub mod status_bar;
pub mod theme;
pub mod tracker;

use crate::app::{App, View};
use layout::AppLayout;
use ratatui::Frame;

pub use status_bar::{render_footer, render_header};

/// Renders the complete TUI interface.
///
/// # Example
///
/// ```ignore
/// terminal.draw(|frame| {
///     ui::render(frame, &app);
/// })?;
/// ```
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, layout.header, app);
    render_footer(frame, layout.footer, app);

    if let Some(walkthrough) = &app.onboarding {
        onboarding::render_onboarding(frame, layout.content, walkthrough);
        return;
    }

    match app.view {
        View::Dashboard => dashboard::render_dashboard(frame, layout.content, app),
        View::Blocker => blocker::render_blocker(frame, layout.content, app),
        View::Tracker => tracker::render_tracker(frame, layout.content, app),
        View::Settings => settings::render_settings(frame, layout.content, app),
    }

    dialog::render_dialog(frame, layout.content, app);
}

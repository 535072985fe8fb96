//! Layout helpers for the Detox TUI.
//!
//! Provides the main application layout and a helper for centering
//! popups over it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main application layout areas.
///
/// The TUI is divided into three vertical sections:
/// - Header (3 lines): title and view tabs
/// - Content (fills remaining): the current view
/// - Footer (3 lines): keybinding hints and status messages
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    /// Header area for title and tabs
    pub header: Rect,
    /// Area of the current view
    pub content: Rect,
    /// Footer area for keybindings
    pub footer: Rect,
}

impl AppLayout {
    /// Creates a new AppLayout by splitting the given area.
    pub fn new(area: Rect) -> Self {
        let [header, content, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Content (minimum 10 lines)
                Constraint::Length(3), // Footer
            ])
            .areas(area);

        Self {
            header,
            content,
            footer,
        }
    }
}

/// Returns a rectangle of `width` x `height` centered in `area`, shrunk to
/// fit when `area` is smaller.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let y = area.y.saturating_add(area.height.saturating_sub(height) / 2);
    Rect::new(x, y, width, height)
}

//! Detox TUI - Library modules
//!
//! This library provides the terminal interface for tracking and limiting
//! screen time.
//!
//! # Architecture
//!
//! The TUI uses an event-driven architecture with three main components:
//!
//! 1. **Keyboard Task**: Polls for keyboard input and sends events to the main loop
//! 2. **Ticker Task**: Sends one tick per second to drive the stopwatch
//! 3. **Main Event Loop**: Processes events, updates state, persists changes, and renders the UI
//!
//! All tasks respect a shared `CancellationToken` for graceful shutdown.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod ticker;
pub mod ui;

// Re-export commonly used types
pub use app::{App, Mode, View};
pub use config::Config;
pub use error::{Result, TuiError};
pub use input::{handle_key_event, Action, Event};
pub use ticker::Ticker;

//! Error types for the Detox TUI.
//!
//! This module defines TUI-specific errors that can occur during terminal
//! initialization, configuration loading, and persistence.
//!
//! All error types use `thiserror` for derive macros and provide clear,
//! user-friendly error messages.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use detox_store::StoreError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// TUI Error Type
// ============================================================================

/// TUI application errors.
///
/// # Example
///
/// ```rust,ignore
/// use detox_tui::error::{TuiError, Result};
///
/// fn init() -> Result<()> {
///     Err(TuiError::TerminalInit("not a TTY".to_string()))
/// }
/// ```
#[derive(Error, Debug)]
pub enum TuiError {
    /// Failed to initialize the terminal.
    ///
    /// This occurs when the TUI cannot set up raw mode or the alternate
    /// screen. Common causes include running in a non-TTY environment
    /// (pipes, scripts) or an unsupported terminal emulator.
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    /// Failed to cleanup/restore the terminal.
    ///
    /// The terminal may be left in an inconsistent state; running `reset`
    /// can help recover.
    #[error("Failed to restore terminal: {0}")]
    TerminalCleanup(String),

    /// The configuration file exists but could not be parsed.
    #[error("Invalid config file {path}: {source}")]
    Config {
        /// Path of the offending file.
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No data directory could be determined for this platform.
    #[error("Could not determine a data directory; pass --data-dir")]
    NoDataDir,

    /// Reading or writing stored session data failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// I/O error passthrough.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Convenience Result type alias for TUI operations.
pub type Result<T> = std::result::Result<T, TuiError>;

// ============================================================================
// Tests
// ============================================================================

//! Brain Detox - screen-time tracking in the terminal
//!
//! This binary provides the interactive dashboard plus a few one-shot
//! commands for scripting.
//!
//! # Usage
//!
//! ```text
//! detox                 # Interactive TUI
//! detox status          # Print today's overview
//! detox export [DIR]    # Write brain-detox-data.json
//! detox clear [--yes]   # Delete all stored data
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use detox_store::{FileStore, LoadOutcome, Persistence};
use detox_tui::app::App;
use detox_tui::config::{Config, APP_DIR};
use detox_tui::error::{Result as TuiResult, TuiError};
use detox_tui::input::{handle_key_event, Action, Event};
use detox_tui::report::status_report;
use detox_tui::ticker::Ticker;
use detox_tui::ui;

// ============================================================================
// CLI Arguments
// ============================================================================

/// Brain Detox - screen-time tracking in the terminal
#[derive(Parser, Debug)]
#[command(name = "detox")]
#[command(about = "Track screen time, limit apps and log focus sessions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding stored session data
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print today's overview and exit
    Status,
    /// Export stored data as brain-detox-data.json
    Export {
        /// Target directory (defaults to the configured export dir)
        dir: Option<PathBuf>,
    },
    /// Delete all stored data
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

// ============================================================================
// Terminal Setup / Cleanup
// ============================================================================

fn setup_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| TuiError::TerminalInit(e.to_string()))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| TuiError::TerminalInit(e.to_string()))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| TuiError::TerminalInit(e.to_string()))
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
    disable_raw_mode().map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;

    terminal
        .show_cursor()
        .map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;

    Ok(())
}

// ============================================================================
// Keyboard Input Task
// ============================================================================

fn spawn_keyboard_task(
    event_tx: mpsc::UnboundedSender<Event>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if cancel_token.is_cancelled() {
                debug!("Keyboard task shutting down");
                break;
            }

            let poll_result = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await;

            match poll_result {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if event_tx.send(Event::Key(key)).is_err() {
                        debug!("Event channel closed, keyboard task exiting");
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(width, height))) => {
                    if event_tx.send(Event::Resize(width, height)).is_err() {
                        break;
                    }
                }
                Ok(Some(_)) => {}
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "Keyboard polling task panicked");
                    break;
                }
            }
        }
    })
}

// ============================================================================
// Main Event Loop
// ============================================================================

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    persistence: &mut Persistence<FileStore>,
    export_dir: &Path,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    cancel_token: &CancellationToken,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let Some(received_event) = event_rx.recv().await else {
            warn!("Event channel closed");
            break;
        };

        match received_event {
            Event::Key(key) => {
                let action = handle_key_event(key, app);
                handle_action(action, app, persistence, export_dir);
            }
            Event::Tick => app.on_second_tick(),
            Event::Resize(_width, _height) => {
                debug!("Terminal resized");
            }
        }

        if let Err(e) = persistence.sync(&app.store) {
            warn!(error = %e, "Failed to save session");
            app.set_status(format!("Could not save: {e}"));
        }

        if app.should_quit {
            cancel_token.cancel();
            break;
        }

        if cancel_token.is_cancelled() {
            break;
        }
    }

    Ok(())
}

/// Carries out actions that reach beyond the session snapshot.
fn handle_action(
    action: Action,
    app: &mut App,
    persistence: &mut Persistence<FileStore>,
    export_dir: &Path,
) {
    match action {
        Action::None => {}
        Action::Quit => info!("User requested quit"),
        Action::CompleteOnboarding => {
            if let Err(e) = persistence.complete_onboarding() {
                warn!(error = %e, "Failed to store onboarding flag");
            }
        }
        Action::ExportData => {
            if let Err(e) = persistence.sync(&app.store) {
                warn!(error = %e, "Failed to save session before export");
            }
            match persistence.export_to_dir(export_dir) {
                Ok(Some(path)) => app.set_status(format!("Exported to {}", path.display())),
                Ok(None) => app.set_status("Nothing to export yet"),
                Err(e) => {
                    warn!(error = %e, "Export failed");
                    app.set_status(format!("Export failed: {e}"));
                }
            }
        }
        Action::ClearData => match clear_and_reload(persistence) {
            Ok(data) => {
                app.reset_after_clear(data);
                persistence.mark_synced(&app.store);
                app.set_status("All data cleared");
            }
            Err(e) => {
                warn!(error = %e, "Clearing data failed");
                app.set_status(format!("Clear failed: {e}"));
            }
        },
    }
}

fn clear_and_reload(
    persistence: &mut Persistence<FileStore>,
) -> detox_store::StoreResult<detox_core::SessionData> {
    persistence.clear()?;
    Ok(persistence.load()?.data)
}

// ============================================================================
// Logging Setup
// ============================================================================

fn get_log_dir() -> Option<PathBuf> {
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join(APP_DIR));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local/state").join(APP_DIR))
}

fn create_log_file() -> Option<std::fs::File> {
    let log_dir = get_log_dir()?;

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory {log_dir:?}: {e}");
        return None;
    }

    let log_path = log_dir.join("tui.log");

    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to open log file {log_path:?}: {e}");
            None
        }
    }
}

fn default_filter(directive: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::Directive::from(tracing::Level::INFO)),
    )
}

/// The TUI owns the terminal, so it logs to a file.
fn init_file_logging() {
    if let Some(file) = create_log_file() {
        tracing_subscriber::fmt()
            .with_env_filter(default_filter("detox=info"))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .init();
    }
}

/// One-shot commands log warnings to stderr.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter("detox=warn"))
        .with_writer(io::stderr)
        .init();
}

// ============================================================================
// Commands
// ============================================================================

fn open_persistence(data_dir: PathBuf) -> Persistence<FileStore> {
    Persistence::new(FileStore::new(data_dir))
}

fn run_status(persistence: &Persistence<FileStore>) -> Result<()> {
    let loaded = persistence.read().context("Failed to read session data")?;
    if let LoadOutcome::Discarded { reason } = &loaded.outcome {
        eprintln!("Stored data was unreadable ({reason}); showing sample data");
    }
    print!("{}", status_report(&loaded.data));
    Ok(())
}

fn run_export(persistence: &Persistence<FileStore>, dir: &Path) -> Result<()> {
    match persistence
        .export_to_dir(dir)
        .with_context(|| format!("Failed to export to {}", dir.display()))?
    {
        Some(path) => println!("Exported to {}", path.display()),
        None => println!("Nothing to export yet"),
    }
    Ok(())
}

fn run_clear(persistence: &mut Persistence<FileStore>, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to clear all data? This cannot be undone. [y/N] ")? {
        println!("Nothing cleared");
        return Ok(());
    }
    persistence.clear().context("Failed to clear stored data")?;
    println!("All data cleared");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run_tui(config: &Config, mut persistence: Persistence<FileStore>) -> Result<()> {
    init_file_logging();
    info!(data_dir = %persistence.backend().dir().display(), "Detox TUI starting...");

    let loaded = persistence.load().context("Failed to load session data")?;
    let show_onboarding = !persistence
        .onboarding_complete()
        .context("Failed to read onboarding flag")?;

    let mut app = App::new(loaded.data, config.daily_goal_minutes, show_onboarding);
    persistence.mark_synced(&app.store);
    if let LoadOutcome::Discarded { .. } = loaded.outcome {
        app.set_status("Stored data was unreadable; started from sample data");
    }

    let export_dir = config.resolve_export_dir();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let cancel_token = CancellationToken::new();

    let mut terminal = match setup_terminal() {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to initialize terminal");
            return Err(e.into());
        }
    };

    let ticker = Ticker::with_defaults(event_tx.clone(), cancel_token.clone());
    let ticker_handle = tokio::spawn(async move {
        ticker.run().await;
    });

    let keyboard_handle = spawn_keyboard_task(event_tx, cancel_token.clone());

    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &mut persistence,
        &export_dir,
        &mut event_rx,
        &cancel_token,
    )
    .await;

    cancel_token.cancel();

    let _ = tokio::time::timeout(Duration::from_millis(100), ticker_handle).await;
    let _ = tokio::time::timeout(Duration::from_millis(100), keyboard_handle).await;

    if let Err(e) = persistence.sync(&app.store) {
        error!(error = %e, "Failed to save session on exit");
    }

    if let Err(e) = cleanup_terminal(&mut terminal) {
        error!(error = %e, "Failed to cleanup terminal");
    }

    info!("Detox TUI stopped");

    result
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;
    let data_dir = config
        .resolve_data_dir(args.data_dir.as_deref())
        .context("Failed to resolve data directory")?;
    let mut persistence = open_persistence(data_dir);

    match args.command {
        Some(Command::Status) => {
            init_stderr_logging();
            run_status(&persistence)
        }
        Some(Command::Export { dir }) => {
            init_stderr_logging();
            let dir = dir.unwrap_or_else(|| config.resolve_export_dir());
            run_export(&persistence, &dir)
        }
        Some(Command::Clear { yes }) => {
            init_stderr_logging();
            run_clear(&mut persistence, yes)
        }
        None => run_tui(&config, persistence).await,
    }
}

//! Detox Core - Shared types for screen-time tracking
//!
//! This crate provides the domain model (tracked apps and the session
//! aggregate), the store that owns it, and the pure view logic shared
//! between the persistence layer and the TUI.
//!
//! Every mutation is expressed as a [`SessionPatch`] produced by a view
//! operation and merged into the current snapshot by [`Store::apply`].
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod blocker;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod model;
pub mod onboarding;
pub mod session;
pub mod settings;
pub mod store;
pub mod tracker;

// Re-exports for convenience
pub use blocker::{BlockerSummary, FormField, NewAppForm};
pub use dashboard::{Achievement, AppProgress, DashboardSummary, StatCard, StatKind};
pub use error::{DomainError, DomainResult};
pub use metrics::{
    format_clock, format_minutes, parse_or_zero, progress_fraction, share, AppStatus,
    ProgressLevel,
};
pub use model::{AppId, NewApp, TrackedApp, APP_CATEGORIES, APP_ICONS};
pub use onboarding::{Onboarding, OnboardingStep, ONBOARDING_STEPS};
pub use session::{SessionData, SessionPatch};
pub use settings::{SettingToggle, SettingsState};
pub use store::Store;
pub use tracker::{
    weekly_overview, DayEntry, QuickStats, SessionKind, TimeTracker, DEFAULT_DAILY_GOAL,
};

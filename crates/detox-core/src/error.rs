//! Domain-specific error types following panic-free policy.

use crate::AppId;
use thiserror::Error;

/// Errors that can occur in domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A new app was submitted without a usable name
    #[error("App name must not be empty")]
    EmptyAppName,

    /// No tracked app carries the given identifier
    #[error("App not found: {app_id}")]
    AppNotFound { app_id: AppId },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

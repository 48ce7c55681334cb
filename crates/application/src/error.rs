//! Application error types

use authcheck_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The liveness case failed, so no other case ran.
    #[error("backend unavailable at {url}: {reason}")]
    BackendUnavailable {
        /// Liveness URL.
        url: String,
        /// Failure of the liveness case.
        reason: String,
    },
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An endpoint path could not be joined onto the base URL.
    #[error("cannot join '{path}' onto {base}: {reason}")]
    InvalidEndpoint {
        /// Base URL the path was joined onto.
        base: String,
        /// Endpoint path.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// A setting holds a value outside its accepted range.
    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Setting name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

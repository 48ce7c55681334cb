//! HTTP Client port

use std::future::Future;

use authcheck_domain::{RequestErrorKind, request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Errors raised while performing an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Hostname resolution failed.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Nothing listens on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The exchange exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The redirect limit was reached.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    BodyRead(String),

    /// Anything else the client reported.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Classifies the error for display.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::Timeout { .. } => RequestErrorKind::Timeout,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::BodyRead(_) => RequestErrorKind::BodyRead,
            Self::Other(_) => RequestErrorKind::Unknown,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// Any status code counts as a response; only failures to complete the
    /// exchange are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other HTTP-related problems.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        let err = HttpClientError::ConnectionRefused {
            host: "localhost".to_string(),
            port: 3000,
        };
        assert_eq!(err.to_error_kind(), RequestErrorKind::ConnectionRefused);
        assert_eq!(err.to_string(), "connection refused by localhost:3000");

        let err = HttpClientError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_error_kind(), RequestErrorKind::Timeout);
        assert_eq!(err.to_string(), "request timed out after 5000 ms");
    }
}

//! Transport error categories.
//!
//! A failed exchange is classified so the operator gets a few concrete
//! hints instead of a raw client error string.

/// Categories of request errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// Too many redirects.
    TooManyRedirects,

    /// The response body could not be read.
    BodyRead,

    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns user-friendly suggestions for this error type.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidUrl => &[
                "Check that AUTHCHECK_BASE_URL starts with http:// or https://",
                "Verify there are no typos in the URL",
            ],
            Self::DnsError => &[
                "Check if the hostname is correct",
                "Try using an IP address instead",
            ],
            Self::ConnectionFailed | Self::ConnectionRefused => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::Timeout => &[
                "The server may be slow or overloaded",
                "Try increasing AUTHCHECK_TIMEOUT_SECS",
            ],
            Self::TooManyRedirects => &["The server may have a redirect loop"],
            Self::BodyRead => &["The connection dropped while the body was streaming"],
            Self::Unknown => &["Check the error details for more information"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_suggestions() {
        let suggestions = RequestErrorKind::ConnectionRefused.suggestions();
        assert!(!suggestions.is_empty());
        assert!(suggestions[0].contains("server"));
    }

    #[test]
    fn test_timeout_points_at_setting() {
        assert!(
            RequestErrorKind::Timeout
                .suggestions()
                .iter()
                .any(|s| s.contains("AUTHCHECK_TIMEOUT_SECS"))
        );
    }
}

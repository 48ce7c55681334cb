//! Response specification type
//!
//! Contains types for representing HTTP responses including
//! status codes, headers, body, and timing information.

use std::time::Duration;

use crate::api::ApiEnvelope;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase for the codes the account API uses.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// HTTP response specification.
///
/// Contains everything a case needs from one HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Response body, lossily decoded as UTF-8.
    pub body: String,
    /// Response time.
    pub duration: Duration,
    /// Content-Type header value.
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: u16,
        content_type: Option<String>,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        Self {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            duration,
            content_type,
        }
    }

    /// Convenience constructor for a JSON response.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(
            status,
            Some("application/json; charset=utf-8".to_string()),
            body.to_string().as_bytes(),
            Duration::ZERO,
        )
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Decodes the body as the API's response envelope.
    #[must_use]
    pub fn envelope(&self) -> Option<ApiEnvelope> {
        serde_json::from_str(&self.body).ok()
    }

    /// Returns a human-readable duration string (e.g., "124 ms").
    #[must_use]
    pub fn duration_display(&self) -> String {
        let millis = self.duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }

    /// Returns the body cut to `max` characters for display.
    #[must_use]
    pub fn body_preview(&self, max: usize) -> String {
        if self.body.chars().count() > max {
            let cut: String = self.body.chars().take(max).collect();
            format!("{cut}...")
        } else {
            self.body.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::new(409).to_string(), "409 Conflict");
        assert_eq!(StatusCode::new(401).to_string(), "401 Unauthorized");
        assert_eq!(StatusCode::new(599).to_string(), "599 Unknown");
    }

    #[test]
    fn test_response_new() {
        let response = ResponseSpec::new(
            200,
            Some("text/html".to_string()),
            b"<html></html>",
            Duration::from_millis(12),
        );

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("text/html"));
        assert_eq!(response.body, "<html></html>");
        assert!(response.envelope().is_none());
        assert_eq!(response.duration_display(), "12 ms");
    }

    #[test]
    fn test_json_response_and_envelope() {
        let response = ResponseSpec::json(409, &json!({"success": false, "message": "exists"}));
        assert_eq!(
            response.content_type.as_deref(),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(response.status_code(), StatusCode::new(409));

        let envelope = response.envelope();
        assert_eq!(envelope.and_then(|e| e.message).as_deref(), Some("exists"));
    }

    #[test]
    fn test_body_preview() {
        let body = "x".repeat(150);
        let response = ResponseSpec::new(500, None, body.as_bytes(), Duration::ZERO);
        assert_eq!(response.body_preview(100).len(), 103);
        assert_eq!(response.body_preview(200), body);
    }

    #[test]
    fn test_duration_display_seconds() {
        let response = ResponseSpec {
            duration: Duration::from_millis(1500),
            ..ResponseSpec::default()
        };
        assert_eq!(response.duration_display(), "1.50 s");
    }
}

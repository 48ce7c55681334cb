//! Request specification type

use std::time::Duration;

use serde::Serialize;
use url::Url;

use super::HttpMethod;

/// Complete specification for one HTTP call made by a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// JSON body, sent with `Content-Type: application/json`
    pub json: Option<serde_json::Value>,
    /// Bearer token for the `Authorization` header
    pub bearer_token: Option<String>,
    /// Upper bound on the whole exchange
    pub timeout: Duration,
}

impl RequestSpec {
    /// Creates a GET request.
    #[must_use]
    pub const fn get(url: Url, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            json: None,
            bearer_token: None,
            timeout,
        }
    }

    /// Creates a POST request carrying `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn post_json<T: Serialize>(
        url: Url,
        body: &T,
        timeout: Duration,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: HttpMethod::Post,
            url,
            json: Some(serde_json::to_value(body)?),
            bearer_token: None,
            timeout,
        })
    }

    /// Attaches a bearer token.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// URL path, used to label requests in logs.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Timeout in whole milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::LoginRequest;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_post_json_serializes_body() {
        let url = Url::parse("http://localhost:3000/api/login").unwrap();
        let request = RequestSpec::post_json(
            url,
            &LoginRequest::new("u1@example.com", "TestPass123!"),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path(), "/api/login");
        assert_eq!(request.timeout_ms(), 5000);
        assert_eq!(request.json.as_ref().unwrap()["email"], "u1@example.com");
    }

    #[test]
    fn test_get_with_bearer() {
        let url = Url::parse("http://localhost:3000/api/me").unwrap();
        let request = RequestSpec::get(url, Duration::from_secs(1)).with_bearer("abc");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.json.is_none());
        assert_eq!(request.bearer_token.as_deref(), Some("abc"));
    }
}

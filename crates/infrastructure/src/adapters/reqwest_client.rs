//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.

use std::error::Error as _;
use std::future::Future;
use std::time::Instant;

use authcheck_application::ports::{HttpClient, HttpClientError};
use authcheck_domain::{
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method};

const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!("authcheck/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. Timeouts are applied per request.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client.
    ///
    /// Follows up to 10 redirects and identifies itself as `authcheck/<version>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Error text including every source, since reqwest keeps the
    /// OS-level cause (e.g. "Connection refused") out of its own message.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = Self::describe(error);
        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();

        if error.is_connect() {
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::BodyRead(message);
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let request = request.clone();

        async move {
            let timeout_ms = request.timeout_ms();
            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), request.url.as_str())
                .timeout(request.timeout);

            if let Some(token) = &request.bearer_token {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.json {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let body = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            Ok(ResponseSpec::new(status, content_type, &body, start.elapsed()))
        }
    }
}

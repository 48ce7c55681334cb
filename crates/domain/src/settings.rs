//! Check Settings Domain Model
//!
//! Defines where the checker points and how it behaves.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Base URL used when nothing overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Path prefix of the JSON API on the backend.
pub const API_PREFIX: &str = "api";

const MAX_TIMEOUT_SECS: u64 = 300;

/// Terminal color preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always emit ANSI colors.
    Always,
    /// Never emit ANSI colors.
    Never,
}

impl ColorMode {
    /// Resolves the preference against whether the output is a terminal.
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// Parses `auto`, `always` or `never` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// Settings for a single checker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Backend root, e.g. `http://localhost:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether the supplementary cases run after the core eight.
    #[serde(default = "default_extended_checks")]
    pub extended_checks: bool,

    /// Whether the unknown-email login case runs with the supplementary ones.
    ///
    /// Off by default: it is a third login attempt, and the backend allows
    /// five per client every fifteen minutes.
    #[serde(default)]
    pub unknown_login_check: bool,

    /// Terminal color preference.
    #[serde(default)]
    pub color: ColorMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_extended_checks() -> bool {
    true
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            extended_checks: default_extended_checks(),
            unknown_login_check: false,
            color: ColorMode::default(),
        }
    }
}

impl CheckSettings {
    /// Validates the settings, returning them unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or
    /// the timeout is zero or above five minutes.
    pub fn validate(self) -> DomainResult<Self> {
        let url = self.base()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidSetting {
                key: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(DomainError::InvalidSetting {
                key: "timeout_secs",
                reason: format!(
                    "must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                    self.timeout_secs
                ),
            });
        }
        Ok(self)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL, normalized to end with a slash so joins append.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse.
    pub fn base(&self) -> DomainResult<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))
    }

    /// URL of a page served from the backend root (e.g. `signup.html`).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the join fails.
    pub fn page_url(&self, page: &str) -> DomainResult<Url> {
        self.join(page.trim_start_matches('/'))
    }

    /// URL of an API endpoint (e.g. `signup` → `/api/signup`).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the join fails.
    pub fn api_url(&self, endpoint: &str) -> DomainResult<Url> {
        self.join(&format!("{API_PREFIX}/{}", endpoint.trim_start_matches('/')))
    }

    fn join(&self, path: &str) -> DomainResult<Url> {
        let base = self.base()?;
        base.join(path).map_err(|e| DomainError::InvalidEndpoint {
            base: base.to_string(),
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

//! Environment-backed settings loader.

use authcheck_domain::{CheckSettings, ColorMode, DomainError};
use thiserror::Error;

/// Backend root URL.
pub const ENV_BASE_URL: &str = "AUTHCHECK_BASE_URL";
/// Per-request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "AUTHCHECK_TIMEOUT_SECS";
/// Whether supplementary cases run.
pub const ENV_EXTENDED: &str = "AUTHCHECK_EXTENDED";
/// Whether the unknown-email login case runs.
pub const ENV_UNKNOWN_LOGIN: &str = "AUTHCHECK_UNKNOWN_LOGIN";
/// `auto`, `always` or `never`.
pub const ENV_COLOR: &str = "AUTHCHECK_COLOR";
/// <https://no-color.org>
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Errors raised while reading settings from the environment.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A variable held a value that could not be parsed.
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// What the variable accepts.
        expected: &'static str,
    },

    /// The parsed settings failed validation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Loads settings from the process environment.
///
/// # Errors
///
/// Returns an error naming the first variable that is malformed.
pub fn load_settings() -> Result<CheckSettings, SettingsError> {
    load_settings_from(|key| std::env::var(key).ok())
}

/// Loads settings through `lookup`, which returns a variable's value if set.
///
/// Unset or blank variables keep their defaults.
/// An explicit `AUTHCHECK_COLOR` takes precedence over `NO_COLOR`.
///
/// # Errors
///
/// Returns an error naming the first variable that is malformed.
pub fn load_settings_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<CheckSettings, SettingsError> {
    let read = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut settings = CheckSettings::default();

    if let Some(base_url) = read(ENV_BASE_URL) {
        settings.base_url = base_url;
    }

    if let Some(raw) = read(ENV_TIMEOUT_SECS) {
        settings.timeout_secs = raw.parse().map_err(|_| SettingsError::Invalid {
            key: ENV_TIMEOUT_SECS,
            value: raw.clone(),
            expected: "a whole number of seconds",
        })?;
    }

    if let Some(raw) = read(ENV_EXTENDED) {
        settings.extended_checks = parse_flag(&raw).ok_or_else(|| SettingsError::Invalid {
            key: ENV_EXTENDED,
            value: raw.clone(),
            expected: "true or false",
        })?;
    }

    if let Some(raw) = read(ENV_UNKNOWN_LOGIN) {
        settings.unknown_login_check = parse_flag(&raw).ok_or_else(|| SettingsError::Invalid {
            key: ENV_UNKNOWN_LOGIN,
            value: raw.clone(),
            expected: "true or false",
        })?;
    }

    if let Some(raw) = read(ENV_COLOR) {
        settings.color = ColorMode::parse(&raw).ok_or_else(|| SettingsError::Invalid {
            key: ENV_COLOR,
            value: raw.clone(),
            expected: "auto, always or never",
        })?;
    } else if read(ENV_NO_COLOR).is_some() {
        settings.color = ColorMode::Never;
    }

    Ok(settings.validate()?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

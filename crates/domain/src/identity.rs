//! Ephemeral test identities.
//!
//! Every run signs up fresh users against a backend that keeps its data,
//! so addresses carry a millisecond timestamp to stay unique across runs.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Password used for the signed-up test user.
pub const TEST_PASSWORD: &str = "TestPass123!";

/// Password used when probing the duplicate-email rejection.
pub const DUPLICATE_PASSWORD: &str = "AnotherPass123!";

/// Password that must never log the test user in.
pub const WRONG_PASSWORD: &str = "WrongPassword123!";

/// Password below the backend's 6-character minimum.
pub const SHORT_PASSWORD: &str = "abc";

/// Address the backend must reject as malformed.
pub const INVALID_EMAIL: &str = "not-an-email";

/// Domain used for every generated address.
pub const EMAIL_DOMAIN: &str = "example.com";

/// Builds `<prefix>.<unix-millis>@example.com`.
#[must_use]
pub fn unique_email(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}.{}@{EMAIL_DOMAIN}", at.timestamp_millis())
}

/// Generates the identifier attached to one checker run.
#[must_use]
pub fn generate_run_id() -> Uuid {
    Uuid::now_v7()
}

/// A user created by the run and never cleaned up by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralUser {
    /// Display name sent at signup.
    pub full_name: String,
    /// Generated unique email.
    pub email: String,
    /// Known password, if the user was created with one.
    pub password: Option<String>,
}

impl EphemeralUser {
    /// The user created by the valid-signup case.
    #[must_use]
    pub fn signup(at: DateTime<Utc>) -> Self {
        Self {
            full_name: "Test User".to_string(),
            email: unique_email("test.user", at),
            password: Some(TEST_PASSWORD.to_string()),
        }
    }

    /// The password-less user created through checkout auto-registration.
    #[must_use]
    pub fn checkout(at: DateTime<Utc>) -> Self {
        Self {
            full_name: "Auto Customer".to_string(),
            email: unique_email("auto.user", at),
            password: None,
        }
    }
}

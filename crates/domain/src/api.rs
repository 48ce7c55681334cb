//! Wire payloads of the account API.
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::identity::EphemeralUser;

/// Country every generated profile uses.
pub const TEST_COUNTRY: &str = "Bangladesh";

/// `POST /api/signup` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    pub full_name: String,
    /// Account email.
    pub email: String,
    /// Phone number in international format.
    pub phone: String,
    /// Country name.
    pub country: String,
    /// Plain-text password.
    pub password: String,
    /// Authentication type, `email` for password accounts.
    pub auth_type: String,
}

impl SignupRequest {
    /// Builds a password signup for the given identity fields.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            country: TEST_COUNTRY.to_string(),
            password: password.into(),
            auth_type: "email".to_string(),
        }
    }
}

/// `POST /api/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginRequest {
    /// Builds a login body.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// `POST /api/auto-register` body. Carries no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRegisterRequest {
    /// Display name.
    pub full_name: String,
    /// Account email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Country name.
    pub country: String,
}

impl AutoRegisterRequest {
    /// Builds the checkout profile for an ephemeral user.
    #[must_use]
    pub fn for_user(user: &EphemeralUser, phone: impl Into<String>) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: phone.into(),
            country: TEST_COUNTRY.to_string(),
        }
    }
}

/// User record echoed back by signup, login, auto-register and `/api/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Account email, lowercased by the backend.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Country name.
    #[serde(default)]
    pub country: Option<String>,
    /// Authentication type.
    #[serde(default)]
    pub auth_type: Option<String>,
    /// Session token for bearer-authenticated endpoints.
    #[serde(default)]
    pub token: Option<String>,
}

/// Common response envelope. Every field is optional so that a body of an
/// unexpected shape still decodes and the missing parts can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    /// Outcome flag.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Embedded user record.
    #[serde(default)]
    pub user: Option<UserRecord>,
    /// Whether auto-register created the user.
    #[serde(default)]
    pub is_new: Option<bool>,
}

impl ApiEnvelope {
    /// Session token carried in the user record, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_signup_request_wire_names() {
        let body =
            SignupRequest::new("Test User", "u1@example.com", "+8801700000001", "TestPass123!");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "fullName": "Test User",
                "email": "u1@example.com",
                "phone": "+8801700000001",
                "country": "Bangladesh",
                "password": "TestPass123!",
                "authType": "email"
            })
        );
    }

    #[test]
    fn test_auto_register_has_no_password() {
        let user = EphemeralUser {
            full_name: "Auto Customer".to_string(),
            email: "auto@example.com".to_string(),
            password: None,
        };
        let body = AutoRegisterRequest::for_user(&user, "+8801700000005");
        let value = serde_json::to_value(body).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["fullName"], "Auto Customer");
    }

    #[test]
    fn test_envelope_decodes_partial_bodies() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success": false, "message": "Incorrect password"}"#).unwrap();
        assert_eq!(envelope.success, Some(false));
        assert!(envelope.user.is_none());

        let envelope: ApiEnvelope = serde_json::from_str(
            r#"{"success": true, "isNew": true, "user": {"fullName": "A", "email": "a@example.com", "token": "t0k"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.is_new, Some(true));
        assert_eq!(envelope.token(), Some("t0k"));
    }
}

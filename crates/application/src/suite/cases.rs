//! Request and assertion plans for each case.

use std::time::Duration;

use authcheck_domain::{
    Assertion, AutoRegisterRequest, CaseFailure, CaseId, CheckSettings, DomainResult,
    EphemeralUser, LoginRequest, SignupRequest, TestSuite,
    identity::{DUPLICATE_PASSWORD, INVALID_EMAIL, SHORT_PASSWORD, TEST_PASSWORD, WRONG_PASSWORD},
    request::RequestSpec,
};
use serde::Serialize;
use url::Url;

const SIGNUP_PHONE: &str = "+8801700000001";
const DUPLICATE_PHONE: &str = "+8801700000002";
const INVALID_EMAIL_PHONE: &str = "+8801700000003";
const SHORT_PASSWORD_PHONE: &str = "+8801700000004";
const CHECKOUT_PHONE: &str = "+8801700000005";

/// Resolved backend URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Page requested by the liveness case.
    pub signup_page: Url,
    /// `POST /api/signup`.
    pub signup: Url,
    /// `POST /api/login`.
    pub login: Url,
    /// `POST /api/auto-register`.
    pub auto_register: Url,
    /// `GET /api/me`.
    pub me: Url,
}

impl Endpoints {
    /// Resolves every endpoint against the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be joined.
    pub fn resolve(settings: &CheckSettings) -> DomainResult<Self> {
        Ok(Self {
            signup_page: settings.page_url("signup.html")?,
            signup: settings.api_url("signup")?,
            login: settings.api_url("login")?,
            auto_register: settings.api_url("auto-register")?,
            me: settings.api_url("me")?,
        })
    }
}

/// One case ready to send.
#[derive(Debug, Clone)]
pub struct CaseSpec {
    /// Which case this is.
    pub id: CaseId,
    /// Request to send.
    pub request: RequestSpec,
    /// Assertions, status first.
    pub suite: TestSuite,
    /// Shown before the request goes out.
    pub attempt: String,
    /// Shown when every assertion passed.
    pub success_note: &'static str,
}

impl CaseSpec {
    fn new(id: CaseId, request: RequestSpec, attempt: impl Into<String>) -> Self {
        Self {
            id,
            request,
            suite: TestSuite::new(id.key()).with_stop_on_failure(true),
            attempt: attempt.into(),
            success_note: "",
        }
    }

    fn expect_status(mut self, status: u16) -> Self {
        self.suite = self.suite.with_assertion(Assertion::status(status));
        self
    }

    fn expect_field(mut self, path: &str, value: impl Into<serde_json::Value>) -> Self {
        self.suite = self.suite.with_assertion(Assertion::json_eq(path, value));
        self
    }

    const fn on_success(mut self, note: &'static str) -> Self {
        self.success_note = note;
        self
    }

    fn rejected(self, status: u16, note: &'static str) -> Self {
        self.expect_status(status)
            .expect_field("$.success", false)
            .on_success(note)
    }
}

/// A case, or the reason its request could not be built.
pub type Planned = Result<CaseSpec, CaseFailure>;

fn post<T: Serialize>(url: &Url, body: &T, timeout: Duration) -> Result<RequestSpec, CaseFailure> {
    RequestSpec::post_json(url.clone(), body, timeout)
        .map_err(|e| CaseFailure::InvalidRequest(e.to_string()))
}

fn password_of(user: &EphemeralUser) -> Result<&str, CaseFailure> {
    user.password
        .as_deref()
        .ok_or_else(|| CaseFailure::InvalidRequest(format!("{} has no password", user.email)))
}

fn signup_body(full_name: &str, email: &str, phone: &str, password: &str) -> SignupRequest {
    SignupRequest::new(full_name, email, phone, password)
}

/// Case 1: the signup page must be served.
pub fn liveness(endpoints: &Endpoints, timeout: Duration) -> CaseSpec {
    let url = endpoints.signup_page.clone();
    CaseSpec::new(
        CaseId::Server,
        RequestSpec::get(url.clone(), timeout),
        format!("Checking {url}"),
    )
    .expect_status(200)
    .on_success("Server is running")
}

/// Case 2: a fresh signup succeeds.
pub fn signup_valid(endpoints: &Endpoints, user: &EphemeralUser, timeout: Duration) -> Planned {
    let body = signup_body(&user.full_name, &user.email, SIGNUP_PHONE, password_of(user)?);
    Ok(CaseSpec::new(
        CaseId::SignupValid,
        post(&endpoints.signup, &body, timeout)?,
        format!("Signing up {}", user.email),
    )
    .expect_status(200)
    .expect_field("$.success", true)
    .expect_field("$.user.fullName", user.full_name.as_str())
    .expect_field("$.user.email", user.email.as_str())
    .on_success("Signup successful!"))
}

/// Case 3: signing up the same email again conflicts.
pub fn signup_duplicate(endpoints: &Endpoints, email: &str, timeout: Duration) -> Planned {
    let body = signup_body("Another User", email, DUPLICATE_PHONE, DUPLICATE_PASSWORD);
    Ok(CaseSpec::new(
        CaseId::SignupDuplicate,
        post(&endpoints.signup, &body, timeout)?,
        format!("Signing up {email} a second time"),
    )
    .rejected(409, "Duplicate email prevention working!"))
}

/// Case 4: a malformed email is rejected.
pub fn invalid_email(endpoints: &Endpoints, timeout: Duration) -> Planned {
    let body = signup_body("Test User", INVALID_EMAIL, INVALID_EMAIL_PHONE, TEST_PASSWORD);
    Ok(CaseSpec::new(
        CaseId::InvalidEmail,
        post(&endpoints.signup, &body, timeout)?,
        format!("Signing up with email '{INVALID_EMAIL}'"),
    )
    .rejected(400, "Invalid email validation working!"))
}

/// Case 5: a password under six characters is rejected.
pub fn short_password(endpoints: &Endpoints, email: &str, timeout: Duration) -> Planned {
    let body = signup_body("Test User", email, SHORT_PASSWORD_PHONE, SHORT_PASSWORD);
    Ok(CaseSpec::new(
        CaseId::ShortPassword,
        post(&endpoints.signup, &body, timeout)?,
        format!("Signing up {email} with password '{SHORT_PASSWORD}'"),
    )
    .rejected(400, "Short password validation working!"))
}

/// Case 6: the signed-up user can log in.
pub fn login_valid(endpoints: &Endpoints, user: &EphemeralUser, timeout: Duration) -> Planned {
    let body = LoginRequest::new(&user.email, password_of(user)?);
    Ok(CaseSpec::new(
        CaseId::LoginValid,
        post(&endpoints.login, &body, timeout)?,
        format!("Logging in as {}", user.email),
    )
    .expect_status(200)
    .expect_field("$.success", true)
    .expect_field("$.user.email", user.email.as_str())
    .expect_field("$.user.fullName", user.full_name.as_str())
    .on_success("Login successful!"))
}

/// Case 7: a wrong password is rejected.
pub fn login_wrong(endpoints: &Endpoints, email: &str, timeout: Duration) -> Planned {
    let body = LoginRequest::new(email, WRONG_PASSWORD);
    Ok(CaseSpec::new(
        CaseId::LoginWrong,
        post(&endpoints.login, &body, timeout)?,
        format!("Logging in as {email} with a wrong password"),
    )
    .rejected(401, "Wrong password rejection working!"))
}

/// Case 8: checkout auto-registration creates a user.
pub fn auto_register(endpoints: &Endpoints, user: &EphemeralUser, timeout: Duration) -> Planned {
    let body = AutoRegisterRequest::for_user(user, CHECKOUT_PHONE);
    Ok(CaseSpec::new(
        CaseId::AutoRegister,
        post(&endpoints.auto_register, &body, timeout)?,
        format!("Auto-registering {} at checkout", user.email),
    )
    .expect_status(200)
    .expect_field("$.success", true)
    .expect_field("$.isNew", true)
    .on_success("Auto-register successful!"))
}

/// Case 9: auto-registering the same email again finds the existing user.
pub fn auto_register_existing(
    endpoints: &Endpoints,
    user: &EphemeralUser,
    timeout: Duration,
) -> Planned {
    let body = AutoRegisterRequest::for_user(user, CHECKOUT_PHONE);
    Ok(CaseSpec::new(
        CaseId::AutoRegisterExisting,
        post(&endpoints.auto_register, &body, timeout)?,
        format!("Auto-registering {} again", user.email),
    )
    .expect_status(200)
    .expect_field("$.success", true)
    .expect_field("$.isNew", false)
    .on_success("Existing customer recognized!"))
}

/// Case 10: the login token opens the profile endpoint.
pub fn session_profile(
    endpoints: &Endpoints,
    email: &str,
    token: &str,
    timeout: Duration,
) -> CaseSpec {
    CaseSpec::new(
        CaseId::SessionProfile,
        RequestSpec::get(endpoints.me.clone(), timeout).with_bearer(token),
        format!("Fetching profile of {email} with the login token"),
    )
    .expect_status(200)
    .expect_field("$.success", true)
    .expect_field("$.user.email", email)
    .on_success("Session token accepted!")
}

/// Case 11: an unregistered email cannot log in.
pub fn login_unknown(endpoints: &Endpoints, email: &str, timeout: Duration) -> Planned {
    let body = LoginRequest::new(email, TEST_PASSWORD);
    Ok(CaseSpec::new(
        CaseId::LoginUnknown,
        post(&endpoints.login, &body, timeout)?,
        format!("Logging in as unregistered {email}"),
    )
    .rejected(404, "Unknown account rejection working!"))
}

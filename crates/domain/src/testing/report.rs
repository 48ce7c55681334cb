//! Case identities, per-case reports and the run summary.

use std::time::Duration;

use indexmap::IndexMap;
use thiserror::Error;
use uuid::Uuid;

use super::{AssertionResult, TestResults};
use crate::response::StatusCode;
use crate::transport::RequestErrorKind;

/// Every check the runner knows, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseId {
    /// Backend answers `GET /signup.html`.
    Server,
    /// Fresh signup succeeds.
    SignupValid,
    /// Reusing the signup email is rejected with 409.
    SignupDuplicate,
    /// The signed-up user can log in.
    LoginValid,
    /// A wrong password is rejected with 401.
    LoginWrong,
    /// A malformed email is rejected with 400.
    InvalidEmail,
    /// A too-short password is rejected with 400.
    ShortPassword,
    /// Checkout auto-registration creates a user.
    AutoRegister,
    /// Auto-registration of a known email reports `isNew: false`.
    AutoRegisterExisting,
    /// The login token authorizes `GET /api/me`.
    SessionProfile,
    /// Login with an unregistered email is rejected with 404.
    LoginUnknown,
}

impl CaseId {
    /// All cases in execution order.
    pub const ALL: [Self; 11] = [
        Self::Server,
        Self::SignupValid,
        Self::SignupDuplicate,
        Self::LoginValid,
        Self::LoginWrong,
        Self::InvalidEmail,
        Self::ShortPassword,
        Self::AutoRegister,
        Self::AutoRegisterExisting,
        Self::SessionProfile,
        Self::LoginUnknown,
    ];

    /// Stable snake_case key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::SignupValid => "signup_valid",
            Self::SignupDuplicate => "signup_duplicate",
            Self::LoginValid => "login_valid",
            Self::LoginWrong => "login_wrong",
            Self::InvalidEmail => "invalid_email",
            Self::ShortPassword => "short_password",
            Self::AutoRegister => "auto_register",
            Self::AutoRegisterExisting => "auto_register_existing",
            Self::SessionProfile => "session_profile",
            Self::LoginUnknown => "login_unknown",
        }
    }

    /// Summary title: the key with words capitalized.
    #[must_use]
    pub fn title(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fixed case number shown in section headers.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Server => 1,
            Self::SignupValid => 2,
            Self::SignupDuplicate => 3,
            Self::InvalidEmail => 4,
            Self::ShortPassword => 5,
            Self::LoginValid => 6,
            Self::LoginWrong => 7,
            Self::AutoRegister => 8,
            Self::AutoRegisterExisting => 9,
            Self::SessionProfile => 10,
            Self::LoginUnknown => 11,
        }
    }

    /// Section heading.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Server => "Server Running",
            Self::SignupValid => "Signup with Valid Data",
            Self::SignupDuplicate => "Signup with Duplicate Email (Should Fail)",
            Self::InvalidEmail => "Signup with Invalid Email",
            Self::ShortPassword => "Signup with Short Password",
            Self::LoginValid => "Login with Valid Credentials",
            Self::LoginWrong => "Login with Wrong Password",
            Self::AutoRegister => "Auto-Register for Checkout",
            Self::AutoRegisterExisting => "Auto-Register Existing Customer",
            Self::SessionProfile => "Session Profile with Login Token",
            Self::LoginUnknown => "Login with Unknown Email",
        }
    }

    /// Returns true for the checks beyond the core eight.
    #[must_use]
    pub const fn is_supplementary(self) -> bool {
        matches!(
            self,
            Self::AutoRegisterExisting | Self::SessionProfile | Self::LoginUnknown
        )
    }
}

/// Why a case failed. Never propagates past the case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseFailure {
    /// The request never produced a response.
    #[error("Request failed: {message}")]
    Transport {
        /// Error category.
        kind: RequestErrorKind,
        /// Client error text.
        message: String,
    },

    /// The backend answered with another status.
    #[error("Expected {expected}, got {actual}")]
    UnexpectedStatus {
        /// Status the case expects.
        expected: StatusCode,
        /// Status received.
        actual: StatusCode,
    },

    /// The body was not JSON or lacked an expected field.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A field held an unexpected value.
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CaseFailure {
    /// Maps the first failed assertion of `results` to a failure.
    ///
    /// Returns `None` when every evaluated assertion passed.
    #[must_use]
    pub fn from_results(results: &TestResults, actual_status: u16) -> Option<Self> {
        let failed = results.first_failure()?;
        let detail = failed
            .error
            .clone()
            .unwrap_or_else(|| failed.assertion.description());

        Some(match (&failed.assertion, failed.kind) {
            (super::Assertion::StatusCode { expected }, _) => Self::UnexpectedStatus {
                expected: StatusCode::new(*expected),
                actual: StatusCode::new(actual_status),
            },
            (_, Some(kind)) if kind.is_shape() => Self::UnexpectedShape(detail),
            _ => Self::AssertionFailed(detail),
        })
    }
}

/// Outcome of one executed case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    /// Which case ran.
    pub id: CaseId,
    /// Failure, if the case did not pass.
    pub failure: Option<CaseFailure>,
    /// Assertions that were evaluated.
    pub assertions: Vec<AssertionResult>,
    /// Wall time of the HTTP exchange.
    pub duration: Duration,
}

impl CaseReport {
    /// A passing report.
    #[must_use]
    pub const fn passed(id: CaseId, assertions: Vec<AssertionResult>, duration: Duration) -> Self {
        Self {
            id,
            failure: None,
            assertions,
            duration,
        }
    }

    /// A failing report.
    #[must_use]
    pub const fn failed(
        id: CaseId,
        failure: CaseFailure,
        assertions: Vec<AssertionResult>,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            failure: Some(failure),
            assertions,
            duration,
        }
    }

    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.failure.is_none()
    }
}

/// Insertion-ordered outcomes of the cases that ran.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    reports: IndexMap<CaseId, CaseReport>,
}

impl ResultSet {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a report and returns whether it passed.
    ///
    /// Each case runs once per run, so a second report for the same id
    /// replaces the first in place.
    pub fn record(&mut self, report: CaseReport) -> bool {
        let passed = report.is_pass();
        self.reports.insert(report.id, report);
        passed
    }

    /// Reports in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &CaseReport> {
        self.reports.values()
    }

    /// Freezes the set into a summary.
    #[must_use]
    pub fn summarize(&self, run_id: Uuid) -> RunSummary {
        let entries: Vec<SummaryEntry> = self
            .iter()
            .map(|report| SummaryEntry {
                id: report.id,
                title: report.id.title(),
                passed: report.is_pass(),
            })
            .collect();
        let passed = entries.iter().filter(|e| e.passed).count();

        RunSummary {
            run_id,
            total: entries.len(),
            passed,
            entries,
        }
    }
}

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Case that ran.
    pub id: CaseId,
    /// Display title.
    pub title: String,
    /// Outcome.
    pub passed: bool,
}

/// Final tally of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// Executed cases in order.
    pub entries: Vec<SummaryEntry>,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of executed cases.
    pub total: usize,
}

impl RunSummary {
    /// Returns true if every executed case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Number of failed cases.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.total - self.passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Assertion, FailureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_titles() {
        assert_eq!(CaseId::SignupValid.title(), "Signup Valid");
        assert_eq!(CaseId::AutoRegisterExisting.title(), "Auto Register Existing");
        assert_eq!(CaseId::Server.title(), "Server");
    }

    #[test]
    fn test_case_numbers_are_unique() {
        let mut numbers: Vec<u8> = CaseId::ALL.iter().map(|c| c.number()).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), CaseId::ALL.len());
    }

    #[test]
    fn test_failure_from_status_mismatch() {
        let results = TestResults::new(
            "dup",
            vec![AssertionResult::fail_with_value(
                Assertion::status(409),
                FailureKind::Mismatch,
                "200 OK",
                "Expected 409 Conflict, got 200 OK",
            )],
        );
        let failure = CaseFailure::from_results(&results, 200);
        assert_eq!(
            failure,
            Some(CaseFailure::UnexpectedStatus {
                expected: StatusCode::new(409),
                actual: StatusCode::new(200),
            })
        );
        assert_eq!(
            failure.map(|f| f.to_string()).as_deref(),
            Some("Expected 409 Conflict, got 200 OK")
        );
    }

    #[test]
    fn test_failure_from_missing_field() {
        let results = TestResults::new(
            "signup",
            vec![
                AssertionResult::pass_with_value(Assertion::status(200), "200 OK"),
                AssertionResult::fail(
                    Assertion::json_eq("$.user.email", "u1@example.com"),
                    FailureKind::MissingField,
                    "JSON path '$.user.email' not found in response",
                ),
            ],
        );
        assert!(matches!(
            CaseFailure::from_results(&results, 200),
            Some(CaseFailure::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_failure_none_when_all_pass() {
        let results = TestResults::new(
            "ok",
            vec![AssertionResult::pass_with_value(Assertion::status(200), "200 OK")],
        );
        assert_eq!(CaseFailure::from_results(&results, 200), None);
    }

    #[test]
    fn test_result_set_keeps_order_and_counts() {
        let mut set = ResultSet::new();
        assert!(set.record(CaseReport::passed(CaseId::Server, vec![], Duration::ZERO)));
        assert!(!set.record(CaseReport::failed(
            CaseId::SignupValid,
            CaseFailure::Transport {
                kind: RequestErrorKind::ConnectionRefused,
                message: "connection refused".to_string(),
            },
            vec![],
            Duration::ZERO,
        )));
        assert!(set.record(CaseReport::passed(CaseId::InvalidEmail, vec![], Duration::ZERO)));

        assert!(set.record(CaseReport::passed(CaseId::Server, vec![], Duration::ZERO)));

        let summary = set.summarize(Uuid::nil());
        let keys: Vec<&str> = summary.entries.iter().map(|e| e.id.key()).collect();
        assert_eq!(keys, vec!["server", "signup_valid", "invalid_email"]);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
    }
}

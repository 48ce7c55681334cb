//! Response testing and assertions.
//!
//! This module provides types for defining and executing checks on HTTP
//! responses, and for collecting the per-case outcomes of a run.

mod evaluate;
mod report;

use serde::{Deserialize, Serialize};

pub use evaluate::AssertionRunner;
pub use report::{CaseFailure, CaseId, CaseReport, ResultSet, RunSummary, SummaryEntry};

/// A test assertion to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check the value at a JSON path.
    JsonPath {
        /// JSONPath expression (e.g., "$.user.email").
        path: String,
        /// Expected value (as JSON).
        expected: serde_json::Value,
    },
}

impl Assertion {
    /// Status code assertion.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::StatusCode { expected }
    }

    /// JSON path equality assertion.
    #[must_use]
    pub fn json_eq(path: impl Into<String>, expected: impl Into<serde_json::Value>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::JsonPath { path, expected } => format!("JSON {path} equals {expected}"),
        }
    }
}

/// Why an assertion failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The value was present but differed from the expectation.
    Mismatch,
    /// The body parsed but the expected field was absent.
    MissingField,
    /// The body was not JSON at all.
    InvalidJson,
}

impl FailureKind {
    /// Returns true if the response did not have the expected shape.
    #[must_use]
    pub const fn is_shape(self) -> bool {
        matches!(self, Self::MissingField | Self::InvalidJson)
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
    /// Failure category if failed.
    pub kind: Option<FailureKind>,
}

impl AssertionResult {
    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
            kind: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
            kind: Some(kind),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        kind: FailureKind,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
            kind: Some(kind),
        }
    }
}

/// A test suite containing multiple assertions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TestSuite {
    /// Test suite name.
    pub name: String,
    /// Assertions to run.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Whether to stop on first failure.
    #[serde(default)]
    pub stop_on_failure: bool,
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Set whether to stop on first failure (builder pattern).
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Check if the suite is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Get the number of assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResults {
    /// Test suite that was run.
    pub suite_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions evaluated.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(suite_name: impl Into<String>, results: Vec<AssertionResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            results,
            total,
            passed,
            failed,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The first failed assertion, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&AssertionResult> {
        self.results.iter().find(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_assertion_description() {
        assert_eq!(Assertion::status(409).description(), "Status code = 409");
        assert_eq!(
            Assertion::json_eq("$.success", false).description(),
            "JSON $.success equals false"
        );
    }

    #[test]
    fn test_assertion_serialization() {
        let assertion = Assertion::json_eq("$.user.email", "a@example.com");
        let value = serde_json::to_value(assertion).unwrap_or_default();
        assert_eq!(
            value,
            json!({"type": "json_path", "path": "$.user.email", "expected": "a@example.com"})
        );
    }

    #[test]
    fn test_test_suite_builder() {
        let suite = TestSuite::new("Signup")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_eq("$.success", true))
            .with_stop_on_failure(true);

        assert_eq!(suite.name, "Signup");
        assert_eq!(suite.len(), 2);
        assert!(suite.stop_on_failure);
        assert!(!suite.is_empty());
    }

    #[test]
    fn test_test_results() {
        let results = vec![
            AssertionResult::pass_with_value(Assertion::status(200), "200 OK"),
            AssertionResult::fail(
                Assertion::json_eq("$.success", true),
                FailureKind::InvalidJson,
                "Invalid JSON",
            ),
        ];

        let test_results = TestResults::new("Suite", results);
        assert_eq!(test_results.total, 2);
        assert_eq!(test_results.passed, 1);
        assert_eq!(test_results.failed, 1);
        assert!(!test_results.all_passed());
        assert_eq!(
            test_results.first_failure().and_then(|r| r.kind),
            Some(FailureKind::InvalidJson)
        );
    }

    #[test]
    fn test_failure_kind_shape() {
        assert!(FailureKind::MissingField.is_shape());
        assert!(FailureKind::InvalidJson.is_shape());
        assert!(!FailureKind::Mismatch.is_shape());
    }
}

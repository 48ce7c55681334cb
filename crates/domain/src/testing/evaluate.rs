//! Assertion evaluation.
//!
//! Executes assertions against HTTP responses and produces test results.

use serde_json::Value;

use super::{Assertion, AssertionResult, FailureKind, TestResults, TestSuite};
use crate::response::{ResponseSpec, StatusCode};

/// Runner that evaluates assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionRunner {
    /// Whether to stop on first failure.
    stop_on_failure: bool,
}

impl AssertionRunner {
    /// Create a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Set whether to stop on first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Run a test suite against a response.
    #[must_use]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let mut results = Vec::with_capacity(suite.assertions.len());

        for assertion in &suite.assertions {
            let result = self.run_assertion(assertion, response);
            let failed = !result.passed;
            results.push(result);

            if failed && (self.stop_on_failure || suite.stop_on_failure) {
                break;
            }
        }

        TestResults::new(&suite.name, results)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected)
            }
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status_code();
        if actual.as_u16() == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                FailureKind::Mismatch,
                actual.to_string(),
                format!("Expected {}, got {}", StatusCode::new(expected), actual),
            )
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: &Value,
    ) -> AssertionResult {
        let json = match serde_json::from_str::<Value>(&response.body) {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail_with_value(
                    assertion.clone(),
                    FailureKind::InvalidJson,
                    response.body_preview(100),
                    format!("Failed to parse body as JSON: {e}"),
                );
            }
        };

        match query_json_path(&json, path) {
            Ok(Some(value)) if value == expected => {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            }
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                FailureKind::Mismatch,
                value.to_string(),
                format!("JSON path '{path}' value mismatch: expected {expected}, got {value}"),
            ),
            Ok(None) => AssertionResult::fail(
                assertion.clone(),
                FailureKind::MissingField,
                format!("JSON path '{path}' not found in response"),
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                FailureKind::MissingField,
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0]
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    if rest.is_empty() {
        return Ok(Some(json));
    }

    let mut current = json;
    for segment in rest.split('.') {
        let (name, index) = parse_array_access(segment)?;
        if !name.is_empty() {
            current = match current.get(name) {
                Some(v) => v,
                None => return Ok(None),
            };
        }
        if let Some(idx) = index {
            current = match current.get(idx) {
                Some(v) => v,
                None => return Ok(None),
            };
        }
    }

    // null counts as absent
    if current.is_null() {
        return Ok(None);
    }
    Ok(Some(current))
}

/// Parse array access like "items[0]" into ("items", Some(0)).
fn parse_array_access(segment: &str) -> Result<(&str, Option<usize>), String> {
    match segment.find('[') {
        Some(start) if segment.ends_with(']') => {
            let raw = &segment[start + 1..segment.len() - 1];
            let idx = raw
                .parse()
                .map_err(|_| format!("Invalid array index: {raw}"))?;
            Ok((&segment[..start], Some(idx)))
        }
        Some(_) => Err(format!("Unclosed bracket in segment: {segment}")),
        None => Ok((segment, None)),
    }
}

//! Authcheck Domain - Core types
//!
//! This crate defines the domain model of the signup/login API checker:
//! settings, ephemeral identities, wire payloads, request and response
//! specifications, assertions and run results.
//! All types here are pure Rust with no I/O dependencies.

pub mod api;
pub mod error;
pub mod identity;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;
pub mod transport;

pub use api::{ApiEnvelope, AutoRegisterRequest, LoginRequest, SignupRequest, UserRecord};
pub use error::{DomainError, DomainResult};
pub use identity::{EphemeralUser, generate_run_id, unique_email};
pub use settings::{CheckSettings, ColorMode};
pub use testing::{
    Assertion, AssertionResult, AssertionRunner, CaseFailure, CaseId, CaseReport, FailureKind,
    ResultSet, RunSummary, SummaryEntry, TestResults, TestSuite,
};
pub use transport::RequestErrorKind;

//! Authcheck Application - Use cases and ports
//!
//! This crate runs the signup/login checks. It defines the ports
//! (interfaces) that infrastructure adapters implement and the
//! [`CheckSuite`] use case that drives a run.

pub mod error;
pub mod ports;
pub mod suite;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HttpClient, HttpClientError, ProgressEvent, Reporter};
pub use suite::{CheckSuite, RATE_LIMIT_HINT, START_HINT};

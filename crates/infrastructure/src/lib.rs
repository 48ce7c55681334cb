//! Authcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the environment
//! settings loader used by the binary.

pub mod adapters;
pub mod reporting;
pub mod settings;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use reporting::ConsoleReporter;
pub use settings::{SettingsError, load_settings, load_settings_from};

//! Progress reporting port

use authcheck_domain::RunSummary;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Something the operator should see while the run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Run header.
    Banner {
        /// Run identifier.
        run_id: Uuid,
        /// Backend root under test.
        base_url: String,
        /// When the run started.
        started_at: DateTime<Utc>,
    },
    /// Start of a case.
    Section {
        /// Fixed case number.
        number: u8,
        /// Case heading.
        heading: &'static str,
    },
    /// Neutral detail.
    Info(String),
    /// Passed check.
    Success(String),
    /// Failed check.
    Failure(String),
    /// Something worth attention that is not a failure.
    Warning(String),
    /// Final tally.
    Summary(RunSummary),
}

/// Port receiving progress events in order.
pub trait Reporter: Send + Sync {
    /// Handles one event.
    fn emit(&self, event: ProgressEvent);
}

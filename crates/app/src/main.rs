//! Authcheck - Main Entry Point
//!
//! Checks a running backend's signup/login API end to end and exits
//! with a status a CI job can act on.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use authcheck_application::{ApplicationError, ApplicationResult, CheckSuite};
use authcheck_domain::{ColorMode, RunSummary};
use authcheck_infrastructure::{ConsoleReporter, ReqwestHttpClient, SystemClock, load_settings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Some case failed.
const EXIT_FAILED: u8 = 1;
/// The backend was down or the configuration was rejected.
const EXIT_UNAVAILABLE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            eprintln!("authcheck: {e}");
            return Ok(ExitCode::from(EXIT_UNAVAILABLE));
        }
    };

    let color = settings.color.enabled(std::io::stdout().is_terminal());
    if settings.color == ColorMode::Always {
        colored::control::set_override(true);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %settings.base_url,
        "starting authcheck"
    );

    let suite = match CheckSuite::new(
        Arc::new(ReqwestHttpClient::new()?),
        Arc::new(SystemClock::new()),
        Arc::new(ConsoleReporter::stdout(color)),
        settings,
    ) {
        Ok(suite) => suite,
        Err(e) => {
            tracing::error!(error = %e, "could not set up the run");
            eprintln!("authcheck: {e}");
            return Ok(ExitCode::from(exit_status(&Err(e))));
        }
    };

    let outcome = suite.run().await;
    Ok(ExitCode::from(exit_status(&outcome)))
}

fn exit_status(outcome: &ApplicationResult<RunSummary>) -> u8 {
    match outcome {
        Ok(summary) if summary.all_passed() => 0,
        Ok(_) => EXIT_FAILED,
        Err(ApplicationError::BackendUnavailable { .. } | ApplicationError::Domain(_)) => {
            EXIT_UNAVAILABLE
        }
    }
}

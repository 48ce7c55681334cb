//! Check suite use case
//!
//! Runs every case against the backend in dependency order and
//! collects the outcomes into a [`RunSummary`].

pub mod cases;

use std::sync::Arc;
use std::time::{Duration, Instant};

use authcheck_domain::{
    ApiEnvelope, AssertionRunner, CaseFailure, CaseId, CaseReport, CheckSettings, EphemeralUser,
    ResultSet, RunSummary, generate_run_id, unique_email,
};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, HttpClient, ProgressEvent, Reporter};
use cases::{CaseSpec, Endpoints};

/// Shown when the liveness case fails.
pub const START_HINT: &str =
    "Server is not running. Please start it with: cd backend && node server.js";

/// Shown when a case is answered with 429 Too Many Requests.
pub const RATE_LIMIT_HINT: &str =
    "The backend is rate limiting this client. Wait 15 minutes before running again";

/// Outcome of one case plus the parsed body, for cases that feed later ones.
struct CaseOutcome {
    report: CaseReport,
    envelope: Option<ApiEnvelope>,
}

/// Use case that checks a backend's signup/login API end to end.
pub struct CheckSuite<C: HttpClient, K: Clock, R: Reporter> {
    client: Arc<C>,
    clock: Arc<K>,
    reporter: Arc<R>,
    settings: CheckSettings,
    endpoints: Endpoints,
    runner: AssertionRunner,
}

impl<C: HttpClient, K: Clock, R: Reporter> CheckSuite<C, K, R> {
    /// Creates a suite for the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn new(
        client: Arc<C>,
        clock: Arc<K>,
        reporter: Arc<R>,
        settings: CheckSettings,
    ) -> ApplicationResult<Self> {
        let settings = settings.validate()?;
        let endpoints = Endpoints::resolve(&settings)?;
        Ok(Self {
            client,
            clock,
            reporter,
            settings,
            endpoints,
            runner: AssertionRunner::new().with_stop_on_failure(true),
        })
    }

    /// Runs every applicable case and returns the summary.
    ///
    /// Case failures are part of the summary. The only error is a failed
    /// liveness case, after which nothing else runs.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::BackendUnavailable`] if the backend is not
    /// serving its signup page.
    pub async fn run(&self) -> ApplicationResult<RunSummary> {
        let run_id = generate_run_id();
        let span = info_span!("check_run", %run_id, base_url = %self.settings.base_url);
        self.run_cases(run_id).instrument(span).await
    }

    async fn run_cases(&self, run_id: Uuid) -> ApplicationResult<RunSummary> {
        let timeout = self.settings.timeout();
        let started_at = self.clock.now();
        info!(extended = self.settings.extended_checks, "starting run");

        self.emit(ProgressEvent::Banner {
            run_id,
            base_url: self.settings.base_url.clone(),
            started_at,
        });

        let mut results = ResultSet::new();

        let liveness = self
            .execute(CaseId::Server, Ok(cases::liveness(&self.endpoints, timeout)))
            .await;
        if let Some(failure) = liveness.report.failure {
            self.emit(ProgressEvent::Failure(START_HINT.to_string()));
            warn!(%failure, "backend unavailable, aborting run");
            return Err(ApplicationError::BackendUnavailable {
                url: self.endpoints.signup_page.to_string(),
                reason: failure.to_string(),
            });
        }
        results.record(liveness.report);

        let user = EphemeralUser::signup(self.clock.now());
        let signup = self
            .execute(
                CaseId::SignupValid,
                cases::signup_valid(&self.endpoints, &user, timeout),
            )
            .await;

        let mut login_token = None;
        if results.record(signup.report) {
            let duplicate = self
                .execute(
                    CaseId::SignupDuplicate,
                    cases::signup_duplicate(&self.endpoints, &user.email, timeout),
                )
                .await;
            results.record(duplicate.report);

            let login = self
                .execute(
                    CaseId::LoginValid,
                    cases::login_valid(&self.endpoints, &user, timeout),
                )
                .await;
            if results.record(login.report) {
                login_token = login
                    .envelope
                    .as_ref()
                    .and_then(ApiEnvelope::token)
                    .map(str::to_string);
            }

            let wrong = self
                .execute(
                    CaseId::LoginWrong,
                    cases::login_wrong(&self.endpoints, &user.email, timeout),
                )
                .await;
            results.record(wrong.report);
        } else {
            debug!("signup failed, skipping duplicate and login cases");
        }

        let invalid = self
            .execute(
                CaseId::InvalidEmail,
                cases::invalid_email(&self.endpoints, timeout),
            )
            .await;
        results.record(invalid.report);

        let short_email = unique_email("test.short", self.clock.now());
        let short = self
            .execute(
                CaseId::ShortPassword,
                cases::short_password(&self.endpoints, &short_email, timeout),
            )
            .await;
        results.record(short.report);

        let customer = EphemeralUser::checkout(self.clock.now());
        let auto = self
            .execute(
                CaseId::AutoRegister,
                cases::auto_register(&self.endpoints, &customer, timeout),
            )
            .await;
        let auto_registered = results.record(auto.report);

        if self.settings.extended_checks {
            self.run_supplementary(
                &mut results,
                &user,
                &customer,
                auto_registered,
                login_token.as_deref(),
            )
            .await;
        }

        let summary = results.summarize(run_id);
        info!(
            passed = summary.passed,
            total = summary.total,
            "run finished"
        );
        self.emit(ProgressEvent::Summary(summary.clone()));
        Ok(summary)
    }

    async fn run_supplementary(
        &self,
        results: &mut ResultSet,
        user: &EphemeralUser,
        customer: &EphemeralUser,
        auto_registered: bool,
        login_token: Option<&str>,
    ) {
        let timeout = self.settings.timeout();

        if auto_registered {
            let existing = self
                .execute(
                    CaseId::AutoRegisterExisting,
                    cases::auto_register_existing(&self.endpoints, customer, timeout),
                )
                .await;
            results.record(existing.report);
        }

        if let Some(token) = login_token {
            let profile = self
                .execute(
                    CaseId::SessionProfile,
                    Ok(cases::session_profile(
                        &self.endpoints,
                        &user.email,
                        token,
                        timeout,
                    )),
                )
                .await;
            results.record(profile.report);
        } else {
            debug!("no login token, skipping session profile");
        }

        if !self.settings.unknown_login_check {
            debug!("unknown-email login disabled, skipping");
            return;
        }

        let ghost = unique_email("ghost.user", self.clock.now());
        let unknown = self
            .execute(
                CaseId::LoginUnknown,
                cases::login_unknown(&self.endpoints, &ghost, timeout),
            )
            .await;
        results.record(unknown.report);
    }

    async fn execute(&self, id: CaseId, planned: Result<CaseSpec, CaseFailure>) -> CaseOutcome {
        self.emit(ProgressEvent::Section {
            number: id.number(),
            heading: id.heading(),
        });

        let spec = match planned {
            Ok(spec) => spec,
            Err(failure) => {
                warn!(case = id.key(), %failure, "could not build request");
                self.emit(ProgressEvent::Failure(failure.to_string()));
                return CaseOutcome {
                    report: CaseReport::failed(id, failure, Vec::new(), Duration::ZERO),
                    envelope: None,
                };
            }
        };

        self.emit(ProgressEvent::Info(spec.attempt.clone()));
        debug!(
            case = id.key(),
            method = %spec.request.method,
            path = spec.request.path(),
            "sending request"
        );

        let started = Instant::now();
        let response = match self.client.execute(&spec.request).await {
            Ok(response) => response,
            Err(e) => {
                let kind = e.to_error_kind();
                warn!(case = id.key(), error = %e, "request failed");
                let failure = CaseFailure::Transport {
                    kind,
                    message: e.to_string(),
                };
                self.emit(ProgressEvent::Failure(failure.to_string()));
                if let Some(hint) = kind.suggestions().first() {
                    self.emit(ProgressEvent::Warning((*hint).to_string()));
                }
                return CaseOutcome {
                    report: CaseReport::failed(id, failure, Vec::new(), started.elapsed()),
                    envelope: None,
                };
            }
        };

        self.emit(ProgressEvent::Info(format!(
            "Response status: {} ({})",
            response.status_code(),
            response.duration_display()
        )));

        let results = self.runner.run(&spec.suite, &response);
        let envelope = response.envelope();
        let report = match CaseFailure::from_results(&results, response.status) {
            None => {
                self.emit(ProgressEvent::Success(spec.success_note.to_string()));
                if let Some(message) = envelope.as_ref().and_then(|e| e.message.as_deref()) {
                    self.emit(ProgressEvent::Info(format!("Server message: {message}")));
                }
                CaseReport::passed(id, results.results, response.duration)
            }
            Some(failure) => {
                self.emit(ProgressEvent::Failure(failure.to_string()));
                if response.status == 429 {
                    self.emit(ProgressEvent::Warning(RATE_LIMIT_HINT.to_string()));
                }
                if !response.body.is_empty() {
                    let preview = response.body_preview(200);
                    self.emit(ProgressEvent::Info(match &response.content_type {
                        Some(content_type) => format!("Response ({content_type}): {preview}"),
                        None => format!("Response: {preview}"),
                    }));
                }
                CaseReport::failed(id, failure, results.results, response.duration)
            }
        };

        info!(
            case = id.key(),
            passed = report.is_pass(),
            duration_ms = u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
            "case finished"
        );

        CaseOutcome { report, envelope }
    }

    fn emit(&self, event: ProgressEvent) {
        self.reporter.emit(event);
    }
}

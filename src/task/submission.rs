use crate::core::form_engine::FormEngine;
use crate::core::snapshot::FormSnapshot;
use crate::error::{SinkError, SubmitRefused};
use crate::remote::SinkResponse;
use crate::task::run_state::SubmissionRunState;
use std::time::Instant;
use tracing::{debug, error, info};

pub const SUCCESS_MESSAGE: &str = "User submitted successfully!";
pub const FAILURE_MESSAGE: &str = "Error sending identification form.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub phase: SubmissionPhase,
    pub message: String,
}

/// Terminal feedback for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub run_id: u64,
    pub severity: Severity,
    pub message: String,
}

/// A started submission: the caller hands `payload` to the sink and reports
/// the result back with `settle(run_id, ..)`.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub run_id: u64,
    pub payload: FormSnapshot,
}

/// `Idle -> Submitting -> Succeeded | Failed -> Idle`.
///
/// Single-threaded: the host serializes calls. While a run is in flight every
/// further `begin` is refused without touching state.
#[derive(Debug, Clone)]
pub struct SubmissionLifecycle {
    state: SubmissionState,
    shown_run: Option<u64>,
    runs: SubmissionRunState,
    success_message: String,
    failure_message: String,
}

impl Default for SubmissionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionLifecycle {
    pub fn new() -> Self {
        Self::with_messages(SUCCESS_MESSAGE, FAILURE_MESSAGE)
    }

    pub fn with_messages(success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            state: SubmissionState::default(),
            shown_run: None,
            runs: SubmissionRunState::default(),
            success_message: success.into(),
            failure_message: failure.into(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.state.phase == SubmissionPhase::Submitting
    }

    pub fn runs(&self) -> &SubmissionRunState {
        &self.runs
    }

    pub fn notification(&self) -> Option<Notification> {
        let severity = match self.state.phase {
            SubmissionPhase::Succeeded => Severity::Success,
            SubmissionPhase::Failed => Severity::Error,
            SubmissionPhase::Idle | SubmissionPhase::Submitting => return None,
        };
        Some(Notification {
            run_id: self.shown_run?,
            severity,
            message: self.state.message.clone(),
        })
    }

    /// Starts a run if the form is submittable and nothing is in flight.
    /// A previous outcome still on display is discarded.
    pub fn begin(
        &mut self,
        engine: &FormEngine,
        now: Instant,
    ) -> Result<SubmissionTicket, SubmitRefused> {
        if self.is_submitting() {
            debug!("submit refused: already submitting");
            return Err(SubmitRefused::AlreadySubmitting);
        }
        if let Some((path, _)) = engine.first_error() {
            debug!(first_invalid = %path, "submit refused: form has errors");
            return Err(SubmitRefused::NotSubmittable {
                first_invalid: path.to_string(),
            });
        }

        let run_id = self.runs.next_run_id();
        self.runs.on_started(run_id, now);
        self.state = SubmissionState {
            phase: SubmissionPhase::Submitting,
            message: String::new(),
        };
        self.shown_run = None;
        info!(run_id, "identification submission started");

        Ok(SubmissionTicket {
            run_id,
            payload: engine.snapshot(),
        })
    }

    /// Records the sink outcome for `run_id`. Outcomes for runs that are not
    /// in flight are ignored and return false.
    pub fn settle(
        &mut self,
        run_id: u64,
        outcome: Result<SinkResponse, SinkError>,
        now: Instant,
    ) -> bool {
        let Some(elapsed) = self.runs.on_finished(run_id, now) else {
            debug!(run_id, "ignoring outcome of a run that is not in flight");
            return false;
        };
        let elapsed_ms = elapsed.as_millis() as u64;

        self.state = match outcome {
            Ok(response) => {
                info!(run_id, elapsed_ms, "identification submission succeeded");
                debug!(run_id, response = ?response.0, "sink response");
                SubmissionState {
                    phase: SubmissionPhase::Succeeded,
                    message: self.success_message.clone(),
                }
            }
            Err(err) => {
                error!(run_id, elapsed_ms, error = %err, "identification submission failed");
                SubmissionState {
                    phase: SubmissionPhase::Failed,
                    message: self.failure_message.clone(),
                }
            }
        };
        self.shown_run = Some(run_id);
        true
    }

    /// Clears a displayed outcome. No effect while idle or submitting.
    pub fn dismiss(&mut self) -> bool {
        if !matches!(
            self.state.phase,
            SubmissionPhase::Succeeded | SubmissionPhase::Failed
        ) {
            return false;
        }
        self.state = SubmissionState::default();
        self.shown_run = None;
        true
    }

    /// Clears the outcome only if it belongs to `run_id`.
    pub fn dismiss_run(&mut self, run_id: u64) -> bool {
        if self.shown_run != Some(run_id) {
            return false;
        }
        self.dismiss()
    }
}

pub mod executor;
pub mod run_state;
pub mod submission;

pub use executor::{ExecutionMode, SubmissionCompletion, SubmissionExecutor, SubmissionInvocation};
pub use run_state::SubmissionRunState;
pub use submission::{
    Notification, Severity, SubmissionLifecycle, SubmissionPhase, SubmissionState,
    SubmissionTicket,
};

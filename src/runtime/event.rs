use crate::task::SubmissionCompletion;

/// Events processed by the runtime loop on `tick`.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    SubmissionSettled(SubmissionCompletion),
    NotificationExpired { run_id: u64 },
}

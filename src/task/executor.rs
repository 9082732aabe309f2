use crate::core::snapshot::FormSnapshot;
use crate::error::SinkError;
use crate::remote::{SinkResponse, SubmissionSink};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::warn;

const SINK_PANICKED: &str = "sink panicked";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// The sink call runs on a spawned thread.
    #[default]
    Threaded,
    /// The sink call runs on the caller's thread before `spawn` returns.
    /// For hosts without threads (wasm) and for deterministic tests.
    Inline,
}

pub struct SubmissionInvocation {
    pub run_id: u64,
    pub payload: FormSnapshot,
    pub sink: Arc<dyn SubmissionSink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionCompletion {
    pub run_id: u64,
    pub outcome: Result<SinkResponse, SinkError>,
}

/// Runs sink calls and hands their completions back to the host loop,
/// which collects them with `drain_ready`.
pub struct SubmissionExecutor {
    mode: ExecutionMode,
    completion_tx: Sender<SubmissionCompletion>,
    completion_rx: Receiver<SubmissionCompletion>,
}

impl SubmissionExecutor {
    pub fn new(mode: ExecutionMode) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SubmissionCompletion>();
        Self {
            mode,
            completion_tx,
            completion_rx,
        }
    }

    pub fn threaded() -> Self {
        Self::new(ExecutionMode::Threaded)
    }

    pub fn inline() -> Self {
        Self::new(ExecutionMode::Inline)
    }

    pub fn spawn(&self, invocation: SubmissionInvocation) {
        let completion_tx = self.completion_tx.clone();
        match self.mode {
            ExecutionMode::Threaded => {
                std::thread::spawn(move || {
                    let _ = completion_tx.send(execute_invocation(invocation));
                });
            }
            ExecutionMode::Inline => {
                let _ = completion_tx.send(execute_invocation(invocation));
            }
        }
    }

    pub fn drain_ready(&self) -> Vec<SubmissionCompletion> {
        let mut out = Vec::<SubmissionCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl Default for SubmissionExecutor {
    fn default() -> Self {
        Self::threaded()
    }
}

/// A panicking sink still yields a completion, as a transport failure, so the
/// lifecycle always leaves `Submitting`.
fn execute_invocation(invocation: SubmissionInvocation) -> SubmissionCompletion {
    let run_id = invocation.run_id;
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        invocation.sink.submit(&invocation.payload)
    }))
    .unwrap_or_else(|_| {
        warn!(run_id, "submission sink panicked");
        Err(SinkError::Transport(SINK_PANICKED.to_string()))
    });
    SubmissionCompletion { run_id, outcome }
}

use std::time::{Duration, Instant};

/// Bookkeeping for submission runs: id sequence and the in-flight run with
/// its start instant.
#[derive(Debug, Clone, Default)]
pub struct SubmissionRunState {
    in_flight: Option<(u64, Instant)>,
    sequence: u64,
}

impl SubmissionRunState {
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight.map(|(run_id, _)| run_id)
    }

    pub fn next_run_id(&mut self) -> u64 {
        self.sequence = self.sequence.saturating_add(1);
        self.sequence
    }

    pub fn on_started(&mut self, run_id: u64, now: Instant) {
        self.in_flight = Some((run_id, now));
    }

    /// Time since `run_id` started. `None` (and nothing changes) if
    /// `run_id` is not in flight.
    pub fn on_finished(&mut self, run_id: u64, now: Instant) -> Option<Duration> {
        match self.in_flight {
            Some((current, started_at)) if current == run_id => {
                self.in_flight = None;
                Some(now.saturating_duration_since(started_at))
            }
            _ => None,
        }
    }
}

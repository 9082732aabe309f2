use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum SchedulerCommand<E> {
    EmitNow(E),
    /// Emits `event` after `delay`, superseding anything still pending under
    /// `key`.
    Debounce {
        key: String,
        delay: Duration,
        event: E,
    },
    Cancel {
        key: String,
    },
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask<E> {
    due_at: Instant,
    guard: Guard,
    event: E,
}

/// Keyed timers driven by the host loop's clock.
#[derive(Debug)]
pub struct Scheduler<E> {
    ready: VecDeque<E>,
    delayed: Vec<DelayedTask<E>>,
    key_versions: HashMap<String, u64>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            ready: VecDeque::new(),
            delayed: Vec::new(),
            key_versions: HashMap::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand<E>, now: Instant) {
        match command {
            SchedulerCommand::EmitNow(event) => {
                self.ready.push_back(event);
            }
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
            }
        }
    }

    /// Moves every due, still-valid task to the ready queue and drains it,
    /// preserving scheduling order for immediate events.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<E> {
        let mut due = Vec::<DelayedTask<E>>::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                due.push(self.delayed.swap_remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|task| task.due_at);
        for task in due {
            if self.task_is_valid(&task) {
                self.ready.push_back(task.event);
            }
        }

        self.ready.drain(..).collect()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        if !self.ready.is_empty() {
            return Duration::ZERO;
        }

        let mut next = default_timeout;
        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }
        next
    }

    pub fn has_pending(&self) -> bool {
        !self.ready.is_empty() || !self.delayed.is_empty()
    }

    fn task_is_valid(&self, task: &DelayedTask<E>) -> bool {
        let current = *self.key_versions.get(&task.guard.key).unwrap_or(&0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::{Scheduler, SchedulerCommand};
    use std::time::{Duration, Instant};

    #[test]
    fn delayed_event_fires_at_due_time() {
        let mut scheduler = Scheduler::<&str>::new();
        let start = Instant::now();
        scheduler.schedule(
            SchedulerCommand::Debounce {
                key: "k".to_string(),
                delay: Duration::from_millis(3000),
                event: "expire",
            },
            start,
        );

        assert!(scheduler.drain_ready(start + Duration::from_millis(2999)).is_empty());
        assert_eq!(
            scheduler.poll_timeout(start + Duration::from_millis(2000), Duration::from_secs(10)),
            Duration::from_millis(1000)
        );
        assert_eq!(
            scheduler.drain_ready(start + Duration::from_millis(3000)),
            vec!["expire"]
        );
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn debounce_supersedes_previous_and_cancel_drops() {
        let mut scheduler = Scheduler::<u32>::new();
        let start = Instant::now();
        let later = start + Duration::from_secs(1);
        for (event, at) in [(1, start), (2, later)] {
            scheduler.schedule(
                SchedulerCommand::Debounce {
                    key: "notice".to_string(),
                    delay: Duration::from_secs(3),
                    event,
                },
                at,
            );
        }
        assert!(scheduler.drain_ready(start + Duration::from_secs(3)).is_empty());
        assert_eq!(scheduler.drain_ready(later + Duration::from_secs(3)), vec![2]);

        scheduler.schedule(
            SchedulerCommand::Debounce {
                key: "notice".to_string(),
                delay: Duration::from_secs(3),
                event: 3,
            },
            start,
        );
        scheduler.schedule(
            SchedulerCommand::Cancel {
                key: "notice".to_string(),
            },
            start,
        );
        assert!(scheduler.drain_ready(start + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn immediate_events_keep_order() {
        let mut scheduler = Scheduler::<u32>::new();
        let now = Instant::now();
        scheduler.schedule(SchedulerCommand::EmitNow(1), now);
        scheduler.schedule(SchedulerCommand::EmitNow(2), now);
        assert_eq!(scheduler.poll_timeout(now, Duration::from_secs(1)), Duration::ZERO);
        assert_eq!(scheduler.drain_ready(now), vec![1, 2]);
    }
}

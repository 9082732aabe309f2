use crate::config::EngineConfig;
use crate::core::form_engine::FormEngine;
use crate::core::form_event::FormEvent;
use crate::error::{FormError, SubmitRefused};
use crate::remote::SubmissionSink;
use crate::runtime::event::RuntimeEvent;
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::task::{
    SubmissionExecutor, SubmissionInvocation, SubmissionLifecycle, SubmissionPhase,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const NOTIFICATION_KEY: &str = "submission:notification";

/// Drives one identification form: edits, the submit trigger, sink
/// completions and the notification timer. The host calls `tick` from its
/// event loop; nothing here blocks.
pub struct FormRuntime {
    engine: FormEngine,
    lifecycle: SubmissionLifecycle,
    executor: SubmissionExecutor,
    scheduler: Scheduler<RuntimeEvent>,
    sink: Arc<dyn SubmissionSink>,
    notification_ttl: Duration,
    reset_on_success: bool,
}

impl FormRuntime {
    pub fn new(engine: FormEngine, sink: Arc<dyn SubmissionSink>, config: &EngineConfig) -> Self {
        Self {
            engine,
            lifecycle: SubmissionLifecycle::new(),
            executor: SubmissionExecutor::threaded(),
            scheduler: Scheduler::new(),
            sink,
            notification_ttl: config.notification_duration(),
            reset_on_success: config.reset_on_success,
        }
    }

    pub fn with_executor(mut self, executor: SubmissionExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: SubmissionLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    pub fn lifecycle(&self) -> &SubmissionLifecycle {
        &self.lifecycle
    }

    pub fn set_field(
        &mut self,
        path: &str,
        raw: impl Into<String>,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.engine.set_field(path, raw)
    }

    /// Whether the submit trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        self.engine.is_submittable() && !self.lifecycle.is_submitting()
    }

    pub fn request_submit(&mut self, now: Instant) -> Result<u64, SubmitRefused> {
        let ticket = self.lifecycle.begin(&self.engine, now)?;
        self.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: NOTIFICATION_KEY.to_string(),
            },
            now,
        );
        self.executor.spawn(SubmissionInvocation {
            run_id: ticket.run_id,
            payload: ticket.payload,
            sink: Arc::clone(&self.sink),
        });
        Ok(ticket.run_id)
    }

    /// Applies finished sink calls and expired timers; returns what was handled.
    pub fn tick(&mut self, now: Instant) -> Vec<RuntimeEvent> {
        for completion in self.executor.drain_ready() {
            self.scheduler
                .schedule(SchedulerCommand::EmitNow(RuntimeEvent::SubmissionSettled(completion)), now);
        }

        let events = self.scheduler.drain_ready(now);
        for event in &events {
            self.apply(event, now);
        }
        events
    }

    pub fn dismiss_notification(&mut self, now: Instant) -> bool {
        self.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: NOTIFICATION_KEY.to_string(),
            },
            now,
        );
        self.lifecycle.dismiss()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn reset_form(&mut self) {
        self.engine.reset();
    }

    fn apply(&mut self, event: &RuntimeEvent, now: Instant) {
        match event {
            RuntimeEvent::SubmissionSettled(completion) => {
                let run_id = completion.run_id;
                if !self.lifecycle.settle(run_id, completion.outcome.clone(), now) {
                    return;
                }
                if self.reset_on_success && self.lifecycle.phase() == SubmissionPhase::Succeeded {
                    self.engine.reset();
                }
                self.scheduler.schedule(
                    SchedulerCommand::Debounce {
                        key: NOTIFICATION_KEY.to_string(),
                        delay: self.notification_ttl,
                        event: RuntimeEvent::NotificationExpired { run_id },
                    },
                    now,
                );
            }
            RuntimeEvent::NotificationExpired { run_id } => {
                self.lifecycle.dismiss_run(*run_id);
            }
        }
    }
}

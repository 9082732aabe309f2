pub mod event;
pub mod runner;
pub mod scheduler;

pub use event::RuntimeEvent;
pub use runner::FormRuntime;
pub use scheduler::{Scheduler, SchedulerCommand};

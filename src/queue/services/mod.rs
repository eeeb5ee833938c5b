//! Application services for enqueueing, leasing and reclaiming build jobs.

mod queue;
mod sweeper;
mod trigger;

pub use queue::{JobQueue, QueueError, QueueResult};
pub use sweeper::{DEFAULT_LEASE_TIMEOUT, DANGLING_BUILD_MESSAGE, DanglingJobSweeper};
pub use trigger::{TriggerError, TriggerResult, TriggerService};

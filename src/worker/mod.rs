//! The build worker loop.
//!
//! A worker repeatedly claims the oldest available job, runs it through the
//! compatibility gate and the build executor, and persists the outcome. The
//! status and the job are written on every exit path, so a job never stays
//! leased because of a failure inside the worker. Shutdown requests are only
//! honoured between jobs.

mod config;
mod service;
mod shutdown;

pub use config::{DEFAULT_SLEEP, WorkerConfig};
pub use service::{BuildWorker, JobOutcome, WorkerDependencies, WorkerError, WorkerResult, WorkerSummary};
pub use shutdown::{ShutdownSignal, install_signal_handlers};

#[cfg(test)]
mod tests;

//! Domain model for queued build jobs.

mod error;
mod ids;
mod job;

pub use error::ParseJobFunctionError;
pub use ids::JobId;
pub use job::{Job, JobCounts, JobFunction, JobPayload, NewJob, PersistedJobData};

//! In-memory adapters for the job queue.

mod job;

pub use job::InMemoryJobRepository;

//! Build job queue.
//!
//! Trigger processes enqueue one job per resolved tag; workers claim the
//! oldest available job, run it and mark it finished. Rows are never deleted,
//! so the table doubles as the build history. Jobs whose lease outlives the
//! timeout are reclaimed by a separate sweep:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

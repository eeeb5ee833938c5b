//! Orchestration services for build statuses.

pub mod store;

pub use store::StatusStore;

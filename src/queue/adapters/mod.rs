//! Adapter implementations for the job queue.

pub mod memory;
pub mod postgres;

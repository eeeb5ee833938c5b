//! Adapter implementations for build status storage.

pub mod memory;
pub mod postgres;

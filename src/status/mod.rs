//! Per-tag build status.
//!
//! Each tag keeps its last known outcome, the rendered Dockerfile, the raw
//! build log and whether the label moved on its latest assignment. A tag with
//! no stored row is reported as `PENDING`.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

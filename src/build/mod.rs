//! Image builds for claimed jobs.
//!
//! A claimed job first passes the compatibility gate. Jobs that survive are
//! turned into ordered shell command blocks, rendered into a Dockerfile and
//! built by the container engine. The engine's output is scanned for the
//! intermediate container and image identifiers so both can be removed once
//! the build finishes.
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

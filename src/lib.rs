//! extmatrix: PHP extension compatibility build matrix.
//!
//! For every combination of extension, source channel, PHP version and
//! operating system the crate can enqueue a build job, lease it to a worker,
//! gate it against the extension's declared requirements, render a
//! Dockerfile, build it through the container engine and record the outcome
//! per tag.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and the container engine
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, Docker CLI,
//!   in-memory)
//! - **Services**: Orchestration over injected ports and clocks
//!
//! # Modules
//!
//! - [`tag`]: Canonical build tags
//! - [`matrix`]: Wildcard tag patterns and their lazy expansion
//! - [`spec`]: Extension, operating-system and PHP-version specs
//! - [`queue`]: Build job queue, trigger and dangling-job sweep
//! - [`status`]: Per-tag build status
//! - [`build`]: Compatibility gate, Dockerfile assembly and image builds
//! - [`worker`]: The build worker loop
//! - [`persistence`]: Shared `PostgreSQL` pool

pub mod build;
pub mod matrix;
pub mod persistence;
pub mod queue;
pub mod spec;
pub mod status;
pub mod tag;
pub mod worker;

#[cfg(test)]
mod test_support;

//! Declarative extension, operating-system and PHP-version specifications.
//!
//! Specs are read from three JSON documents and exposed through
//! [`services::SpecRegistry`], which derives the sorted enumerations the
//! matrix engine and trigger use. Document sources sit behind the
//! [`ports::SpecSource`] port:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Derived views in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

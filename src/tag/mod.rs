//! Canonical build tags.
//!
//! A tag names one cell of the compatibility matrix: an extension, the
//! channel it is built from, the PHP runtime version (optionally
//! thread-safe) and the operating system image, written as
//! `ext:channel@php[-zts]-os`. Parsing and serialisation are exact inverses.

mod canonical;
mod channel;
mod error;
mod version;

pub use canonical::Tag;
pub use channel::Channel;
pub use error::TagError;
pub use version::{PhpVersion, compare_versions};

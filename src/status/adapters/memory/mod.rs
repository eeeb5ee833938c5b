//! In-memory adapters for build status storage.

mod status;

pub use status::InMemoryStatusRepository;

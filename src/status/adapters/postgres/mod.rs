//! `PostgreSQL` adapters for build status storage.

mod models;
mod repository;
mod schema;

pub use repository::PostgresStatusRepository;

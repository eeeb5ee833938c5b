//! `PostgreSQL` adapters for the job queue.

mod models;
mod repository;
mod schema;

pub use repository::PostgresJobRepository;

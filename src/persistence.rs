//! Shared `PostgreSQL` connection pool.
//!
//! Each process builds one pool and hands clones of it to the job and status
//! repositories; there is no process-wide connection handle.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migrations in application order.
pub const MIGRATIONS: [&str; 2] = [
    include_str!("../migrations/2020-12-02-180708_create_jobs/up.sql"),
    include_str!("../migrations/2020-12-02-181542_create_statuses/up.sql"),
];

/// Builds a pool of at most `max_size` connections to `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size.max(1)).build(manager)
}

/// Applies every migration on `connection`.
///
/// The migrations are idempotent, so running them against an existing
/// schema is harmless.
///
/// # Errors
///
/// Returns the Diesel error raised by the first failing statement.
pub fn apply_migrations(connection: &mut PgConnection) -> diesel::QueryResult<()> {
    MIGRATIONS
        .iter()
        .try_for_each(|migration| connection.batch_execute(migration))
}

//! Temporary database lifecycle for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use extmatrix::persistence::{PgPool, apply_migrations, build_pool};
use uuid::Uuid;

/// Boxed error type used by the test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Database dropped when the guard goes out of scope.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    pool: PgPool,
}

impl TemporaryDatabase {
    /// Returns a pool connected to the temporary database.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let Ok(mut admin) = PgConnection::establish(&self.admin_url) else {
            return;
        };
        let statement = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name);
        if let Err(err) = admin.batch_execute(&statement) {
            tracing::warn!(database = %self.name, error = %err, "failed to drop test database");
        }
    }
}

/// Creates a migrated database for one test.
///
/// Returns `None` when `DATABASE_URL` is not set.
///
/// # Errors
///
/// Returns an error if the database cannot be created or migrated.
pub fn temporary_database() -> Result<Option<TemporaryDatabase>, BoxError> {
    let Ok(admin_url) = std::env::var("DATABASE_URL") else {
        return Ok(None);
    };
    let name = format!("extmatrix_test_{}", Uuid::new_v4().simple());
    let mut admin = PgConnection::establish(&admin_url)?;
    admin.batch_execute(&format!("CREATE DATABASE \"{name}\""))?;

    let url = database_url(&admin_url, &name);
    let database = TemporaryDatabase {
        pool: build_pool(&url, 2)?,
        admin_url,
        name,
    };
    let mut connection = database.pool.get()?;
    apply_migrations(&mut connection)?;
    Ok(Some(database))
}

fn database_url(admin_url: &str, name: &str) -> String {
    let base = admin_url.split('?').next().unwrap_or(admin_url);
    base.rsplit_once('/')
        .map_or_else(|| format!("{base}/{name}"), |(root, _)| format!("{root}/{name}"))
}

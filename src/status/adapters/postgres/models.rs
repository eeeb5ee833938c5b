//! Diesel row model for build statuses.

use super::schema::statuses;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Status row, used for reads and upserts alike.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct StatusRow {
    /// Canonical tag string.
    pub id: String,
    /// Uppercase status label.
    pub label: String,
    /// Rendered Dockerfile.
    pub file: Option<String>,
    /// Build output or failure message.
    pub log: Option<String>,
    /// Build time in whole seconds.
    pub build_time: i32,
    /// Label change flag.
    pub changed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

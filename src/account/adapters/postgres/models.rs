//! Diesel row models for account persistence.

use super::schema::accounts;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for account records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    /// Internal account identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub full_name: String,
    /// Granted role.
    pub role: String,
    /// Completed-task counter.
    pub completed_tasks: i32,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    /// Internal account identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub full_name: String,
    /// Granted role.
    pub role: String,
    /// Completed-task counter.
    pub completed_tasks: i32,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

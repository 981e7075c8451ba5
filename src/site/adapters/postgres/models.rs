//! Diesel row models for site persistence.

use super::schema::sites;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for site records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteRow {
    /// Internal site identifier.
    pub id: uuid::Uuid,
    /// Owning client account.
    pub client_id: uuid::Uuid,
    /// Site name.
    pub name: String,
    /// Physical location.
    pub location: String,
    /// Kind of site.
    pub site_type: String,
    /// Cover image descriptor, if set.
    pub cover_image: Option<serde_json::Value>,
    /// Total-task counter.
    pub total_tasks: i32,
    /// Completed-task counter.
    pub completed_tasks: i32,
    /// Last completed visit.
    pub last_visit: Option<DateTime<Utc>>,
    /// Embedded sections as JSON.
    pub sections: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for site records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sites)]
pub struct NewSiteRow {
    /// Internal site identifier.
    pub id: uuid::Uuid,
    /// Owning client account.
    pub client_id: uuid::Uuid,
    /// Site name.
    pub name: String,
    /// Physical location.
    pub location: String,
    /// Kind of site.
    pub site_type: String,
    /// Cover image descriptor, if set.
    pub cover_image: Option<serde_json::Value>,
    /// Total-task counter.
    pub total_tasks: i32,
    /// Completed-task counter.
    pub completed_tasks: i32,
    /// Last completed visit.
    pub last_visit: Option<DateTime<Utc>>,
    /// Embedded sections as JSON.
    pub sections: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

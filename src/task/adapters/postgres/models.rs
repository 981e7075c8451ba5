//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Target site.
    pub site_id: uuid::Uuid,
    /// Target sections within the site.
    pub section_ids: Vec<uuid::Uuid>,
    /// Client the work is performed for.
    pub client_id: uuid::Uuid,
    /// Assigned worker account, if any.
    pub worker_id: Option<uuid::Uuid>,
    /// Branch materials draw from, if any.
    pub branch_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// When the work is scheduled.
    pub scheduled_date: DateTime<Utc>,
    /// Planned duration in hours, if estimated.
    pub estimated_duration_hours: Option<f64>,
    /// When work started.
    pub started_at: Option<DateTime<Utc>>,
    /// When work completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Check-in GPS fix as JSON.
    pub start_fix: Option<serde_json::Value>,
    /// Check-out GPS fix as JSON.
    pub end_fix: Option<serde_json::Value>,
    /// Before/after gallery as JSON.
    pub gallery: serde_json::Value,
    /// Reference media snapshot as JSON.
    pub reference_media: serde_json::Value,
    /// Material lines as JSON.
    pub materials: serde_json::Value,
    /// Labor cost component.
    pub cost_labor: f64,
    /// Materials cost component.
    pub cost_materials: f64,
    /// Admin review sub-record as JSON, if any.
    pub review: Option<serde_json::Value>,
    /// Client feedback sub-record as JSON, if any.
    pub feedback: Option<serde_json::Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and whole-document update model for task records.
///
/// `treat_none_as_null` makes updates write `None` fields as SQL `NULL`
/// instead of skipping them; replacing the stored document must be able to
/// clear a fix or a sub-record, not just set one.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Target site.
    pub site_id: uuid::Uuid,
    /// Target sections within the site.
    pub section_ids: Vec<uuid::Uuid>,
    /// Client the work is performed for.
    pub client_id: uuid::Uuid,
    /// Assigned worker account, if any.
    pub worker_id: Option<uuid::Uuid>,
    /// Branch materials draw from, if any.
    pub branch_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// When the work is scheduled.
    pub scheduled_date: DateTime<Utc>,
    /// Planned duration in hours, if estimated.
    pub estimated_duration_hours: Option<f64>,
    /// When work started.
    pub started_at: Option<DateTime<Utc>>,
    /// When work completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Check-in GPS fix as JSON.
    pub start_fix: Option<serde_json::Value>,
    /// Check-out GPS fix as JSON.
    pub end_fix: Option<serde_json::Value>,
    /// Before/after gallery as JSON.
    pub gallery: serde_json::Value,
    /// Reference media snapshot as JSON.
    pub reference_media: serde_json::Value,
    /// Material lines as JSON.
    pub materials: serde_json::Value,
    /// Labor cost component.
    pub cost_labor: f64,
    /// Materials cost component.
    pub cost_materials: f64,
    /// Admin review sub-record as JSON, if any.
    pub review: Option<serde_json::Value>,
    /// Client feedback sub-record as JSON, if any.
    pub feedback: Option<serde_json::Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

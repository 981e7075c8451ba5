//! Diesel row models for inventory persistence.

use super::schema::inventory_items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for inventory items.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = inventory_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InventoryItemRow {
    /// Internal item identifier.
    pub id: uuid::Uuid,
    /// Branch the stock belongs to.
    pub branch_id: uuid::Uuid,
    /// Item name.
    pub name: String,
    /// Measurement unit.
    pub unit: String,
    /// Quantity currently on hand.
    pub current_quantity: f64,
    /// Reorder threshold.
    pub minimum_quantity: f64,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for inventory items.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = inventory_items)]
pub struct NewInventoryItemRow {
    /// Internal item identifier.
    pub id: uuid::Uuid,
    /// Branch the stock belongs to.
    pub branch_id: uuid::Uuid,
    /// Item name.
    pub name: String,
    /// Measurement unit.
    pub unit: String,
    /// Quantity currently on hand.
    pub current_quantity: f64,
    /// Reorder threshold.
    pub minimum_quantity: f64,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

//! `PostgreSQL` adapters for the inventory context.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{InventoryPgPool, PostgresInventoryRepository};

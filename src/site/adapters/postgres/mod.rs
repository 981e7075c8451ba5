//! `PostgreSQL` adapters for the site context.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresSiteRepository, SitePgPool};

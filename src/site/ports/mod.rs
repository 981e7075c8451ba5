//! Ports exposed by the site context.

pub mod repository;

pub use repository::{SiteRepository, SiteRepositoryError, SiteRepositoryResult};

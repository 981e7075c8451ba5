//! Port contracts for the people directory.
//!
//! Ports define infrastructure-agnostic interfaces used by account and task
//! services.

pub mod notifier;
pub mod repository;

pub use notifier::{NotificationDispatcher, NotificationError, NotificationResult};
pub use repository::{AccountRepository, AccountRepositoryError, AccountRepositoryResult};

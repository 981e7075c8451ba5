//! Outbound notification port.
//!
//! Message formatting and delivery live outside the core; this contract is
//! the boundary. Callers treat every dispatch as fire-and-forget: a failed
//! dispatch is logged and never fails the triggering operation.

use crate::account::domain::AccountId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification dispatch operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Outbound notification contract.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Notifies a newly registered account that credentials were issued.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Dispatch`] when delivery fails.
    async fn credentials_issued(&self, account_id: AccountId) -> NotificationResult<()>;

    /// Notifies a worker that a task has been assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Dispatch`] when delivery fails.
    async fn task_assigned(
        &self,
        worker_id: AccountId,
        task_id: TaskId,
        scheduled_for: DateTime<Utc>,
    ) -> NotificationResult<()>;
}

/// Errors returned by notification dispatcher implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The dispatch channel failed.
    #[error("notification dispatch failed: {0}")]
    Dispatch(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a dispatch error.
    pub fn dispatch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Dispatch(Arc::new(err))
    }
}

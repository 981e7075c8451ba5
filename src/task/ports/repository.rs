//! Repository port for task persistence and guarded status writes.

use crate::account::domain::AccountId;
use crate::site::domain::SiteId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Status-changing writes go through [`TaskRepository::update_guarded`],
/// which makes the write conditional on the status the caller read. Two
/// callers racing the same transition get one success and one
/// [`TaskRepositoryError::StatusConflict`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task
    /// identifier already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Replaces the stored task unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces the stored task only when the stored status still equals
    /// `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::StatusConflict`] when another write
    /// moved the task first and [`TaskRepositoryError::NotFound`] when the
    /// task does not exist.
    async fn update_guarded(
        &self,
        task: &Task,
        expected_status: TaskStatus,
    ) -> TaskRepositoryResult<()>;

    /// Lists every task assigned to a worker.
    async fn list_for_worker(&self, worker_id: AccountId) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists every task targeting a site.
    async fn list_for_site(&self, site_id: SiteId) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists terminal tasks whose latest update is older than `cutoff`.
    async fn list_terminal_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A guarded update found the task in a different status than the
    /// caller read.
    #[error("task {task_id} is {actual}, expected {expected}")]
    StatusConflict {
        /// The contested task.
        task_id: TaskId,
        /// Status the caller read before mutating.
        expected: TaskStatus,
        /// Status actually stored.
        actual: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

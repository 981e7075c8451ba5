//! Age-based purging of hosted media and finished tasks.
//!
//! Both sweeps walk terminal tasks older than a configured cutoff.
//! External deletion at the media host is best-effort: an unreachable
//! host is logged and never stops the sweep, because the local record is
//! the source of truth for what the system still owns.

use crate::media::domain::StorageId;
use crate::media::ports::MediaHost;
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Age thresholds for the retention sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    /// Days a finished task keeps its hosted media.
    pub media_max_age_days: u32,
    /// Days a finished task is kept at all.
    pub task_max_age_days: u32,
}

impl RetentionConfig {
    /// Overrides the hosted-media age threshold.
    #[must_use]
    pub const fn with_media_max_age_days(mut self, days: u32) -> Self {
        self.media_max_age_days = days;
        self
    }

    /// Overrides the task age threshold.
    #[must_use]
    pub const fn with_task_max_age_days(mut self, days: u32) -> Self {
        self.task_max_age_days = days;
        self
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            media_max_age_days: 90,
            task_max_age_days: 365,
        }
    }
}

/// Service-level errors for retention sweeps.
#[derive(Debug, Error)]
pub enum RetentionError {
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for retention service operations.
pub type RetentionResult<T> = Result<T, RetentionError>;

/// Scheduled retention sweeps over finished tasks.
#[derive(Clone)]
pub struct RetentionService<T, H, C>
where
    T: TaskRepository,
    H: MediaHost,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    host: Arc<H>,
    config: RetentionConfig,
    clock: Arc<C>,
}

impl<T, H, C> RetentionService<T, H, C>
where
    T: TaskRepository,
    H: MediaHost,
    C: Clock + Send + Sync,
{
    /// Creates a new retention service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, host: Arc<H>, config: RetentionConfig, clock: Arc<C>) -> Self {
        Self {
            tasks,
            host,
            config,
            clock,
        }
    }

    /// Strips hosted media from finished tasks older than the media
    /// threshold, returning how many media objects were released.
    ///
    /// Reference media snapshots are untouched; the storage objects behind
    /// them belong to the sections they were copied from.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::Repository`] when listing or updating
    /// tasks fails. Media host failures are logged, not returned.
    pub async fn purge_aged_media(&self) -> RetentionResult<usize> {
        let cutoff = self.cutoff(self.config.media_max_age_days);
        let aged = self.tasks.list_terminal_older_than(cutoff).await?;

        let mut released = 0;
        let mut scrubbed_tasks = 0;
        for mut task in aged {
            let hosted = task.hosted_media();
            if hosted.is_empty() {
                continue;
            }
            for media in &hosted {
                self.delete_at_host(media.storage_id()).await;
            }
            task.clear_hosted_media(&*self.clock);
            self.tasks.update(&task).await?;
            released += hosted.len();
            scrubbed_tasks += 1;
        }

        info!(released, scrubbed_tasks, "aged hosted media purged");
        Ok(released)
    }

    /// Deletes finished tasks older than the task threshold outright,
    /// hosted media first, returning how many tasks were removed.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::Repository`] when listing or deleting
    /// tasks fails. Media host failures are logged, not returned.
    pub async fn purge_aged_tasks(&self) -> RetentionResult<usize> {
        let cutoff = self.cutoff(self.config.task_max_age_days);
        let aged = self.tasks.list_terminal_older_than(cutoff).await?;

        let mut removed = 0;
        for task in aged {
            for media in task.hosted_media() {
                self.delete_at_host(media.storage_id()).await;
            }
            self.tasks.delete(task.id()).await?;
            removed += 1;
        }

        info!(removed, "aged tasks purged");
        Ok(removed)
    }

    fn cutoff(&self, days: u32) -> DateTime<Utc> {
        self.clock.utc() - chrono::Duration::days(i64::from(days))
    }

    async fn delete_at_host(&self, storage_id: &StorageId) {
        if let Err(err) = self.host.delete(storage_id).await {
            warn!(storage_id = %storage_id, error = %err, "media host delete failed; continuing");
        }
    }
}

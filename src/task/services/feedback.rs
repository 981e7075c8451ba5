//! Client feedback recording against completed tasks.

use crate::account::domain::{AccountId, Principal, Role};
use crate::media::domain::StoredMedia;
use crate::task::{
    domain::{Feedback, Rating, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for submitting feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitFeedbackRequest {
    task_id: TaskId,
    rating: u8,
    comment: Option<String>,
    attachment_index: Option<u32>,
    photo: Option<StoredMedia>,
}

impl SubmitFeedbackRequest {
    /// Creates a feedback request with the given star rating.
    #[must_use]
    pub const fn new(task_id: TaskId, rating: u8) -> Self {
        Self {
            task_id,
            rating,
            comment: None,
            attachment_index: None,
            photo: None,
        }
    }

    /// Attaches a free-text comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Points the feedback at one of the task's gallery positions.
    #[must_use]
    pub const fn with_attachment_index(mut self, index: u32) -> Self {
        self.attachment_index = Some(index);
        self
    }

    /// Attaches a photo taken by the client.
    #[must_use]
    pub fn with_photo(mut self, photo: StoredMedia) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Service-level errors for feedback operations.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The caller is not permitted to record feedback on the task.
    #[error("principal {principal} may not {action}")]
    Forbidden {
        /// What was attempted.
        action: &'static str,
        /// Who attempted it.
        principal: AccountId,
    },
}

/// Result type for feedback service operations.
pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Feedback recording service.
///
/// Feedback is the one write path clients hold; it opens only once the
/// task is completed, and a resubmission replaces the prior record.
#[derive(Clone)]
pub struct FeedbackService<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<T, C> FeedbackService<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new feedback service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self { tasks, clock }
    }

    /// Records rated feedback on a completed task, replacing any prior
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::Forbidden`] unless the caller is the
    /// owning client or an admin,
    /// [`TaskDomainError::RatingOutOfRange`] for ratings outside 1 to 5,
    /// [`TaskDomainError::FeedbackRequiresCompletion`] for tasks not yet
    /// completed, and persistence errors otherwise.
    pub async fn submit(
        &self,
        principal: &Principal,
        request: SubmitFeedbackRequest,
    ) -> FeedbackResult<Task> {
        let mut task = self.load_authorized(principal, request.task_id).await?;

        let rating = Rating::new(request.rating)?;
        let mut feedback = Feedback::new(rating, &*self.clock);
        if let Some(comment) = request.comment {
            feedback = feedback.with_comment(comment);
        }
        if let Some(index) = request.attachment_index {
            feedback = feedback.with_attachment_index(index);
        }
        if let Some(photo) = request.photo {
            feedback = feedback.with_photo(photo);
        }

        task.record_feedback(feedback, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Records the one-tap "satisfied" shortcut: a full rating with no
    /// comment, marked as such.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::Forbidden`] unless the caller is the
    /// owning client or an admin,
    /// [`TaskDomainError::FeedbackRequiresCompletion`] for tasks not yet
    /// completed, and persistence errors otherwise.
    pub async fn submit_satisfied(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> FeedbackResult<Task> {
        let mut task = self.load_authorized(principal, task_id).await?;
        task.record_feedback(Feedback::satisfied(&*self.clock), &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    async fn load_authorized(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> FeedbackResult<Task> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(FeedbackError::TaskNotFound(task_id))?;
        if !may_submit(&task, principal) {
            return Err(FeedbackError::Forbidden {
                action: "record feedback on this task",
                principal: principal.id,
            });
        }
        Ok(task)
    }
}

/// Feedback belongs to the client the task bills to; admins may record it
/// on their behalf. The assigned worker never rates their own work.
fn may_submit(task: &Task, principal: &Principal) -> bool {
    principal.is_admin()
        || (matches!(principal.role, Role::Client) && principal.acts_for(task.client_id()))
}

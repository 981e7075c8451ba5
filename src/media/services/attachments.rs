//! Before/after gallery management on tasks.
//!
//! Uploads happen outside the core; this service records the returned
//! descriptors as attachments, controls their client visibility, and asks
//! the host to drop the object when an attachment is removed.

use crate::account::domain::{AccountId, Principal};
use crate::media::domain::StoredMedia;
use crate::media::ports::MediaHost;
use crate::task::{
    domain::{Attachment, AttachmentId, MediaSlot, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Service-level errors for attachment operations.
#[derive(Debug, Error)]
pub enum MediaAttachmentError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// An attach request carried no descriptors.
    #[error("at least one media descriptor is required")]
    EmptyUploadList,
    /// The caller is not permitted to manage the task's media.
    #[error("principal {principal} may not {action}")]
    Forbidden {
        /// What was attempted.
        action: &'static str,
        /// Who attempted it.
        principal: AccountId,
    },
}

/// Result type for attachment service operations.
pub type MediaAttachmentResult<T> = Result<T, MediaAttachmentError>;

/// Gallery attachment service.
#[derive(Clone)]
pub struct MediaAttachmentService<T, H, C>
where
    T: TaskRepository,
    H: MediaHost,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    host: Arc<H>,
    clock: Arc<C>,
}

impl<T, H, C> MediaAttachmentService<T, H, C>
where
    T: TaskRepository,
    H: MediaHost,
    C: Clock + Send + Sync,
{
    /// Creates a new attachment service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, host: Arc<H>, clock: Arc<C>) -> Self {
        Self { tasks, host, clock }
    }

    /// Records uploaded descriptors as attachments in a gallery slot,
    /// stamped with the uploader and the shared visibility flag.
    ///
    /// # Errors
    ///
    /// Returns [`MediaAttachmentError::EmptyUploadList`] when no descriptor
    /// is given, [`MediaAttachmentError::Forbidden`] unless the caller is
    /// an admin or the assigned worker, and persistence errors otherwise.
    pub async fn add_media(
        &self,
        principal: &Principal,
        task_id: TaskId,
        slot: MediaSlot,
        media: Vec<StoredMedia>,
        visible_to_client: bool,
    ) -> MediaAttachmentResult<Task> {
        if media.is_empty() {
            return Err(MediaAttachmentError::EmptyUploadList);
        }

        let mut task = self.load_authorized(principal, task_id, "attach media").await?;
        for descriptor in media {
            let attachment =
                Attachment::new(descriptor, principal.id, visible_to_client, &*self.clock);
            task.add_attachment(slot, attachment, &*self.clock);
        }
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Removes one attachment, asking the host to drop the object first.
    ///
    /// The host call is best-effort: an unreachable host is logged and the
    /// local removal still lands, so a dead provider cannot pin records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownAttachment`] when the slot holds
    /// no such attachment, [`MediaAttachmentError::Forbidden`] unless the
    /// caller is an admin or the assigned worker, and persistence errors
    /// otherwise.
    pub async fn remove_media(
        &self,
        principal: &Principal,
        task_id: TaskId,
        slot: MediaSlot,
        attachment_id: AttachmentId,
    ) -> MediaAttachmentResult<Task> {
        let mut task = self.load_authorized(principal, task_id, "remove media").await?;

        let storage_id = task
            .attachment(slot, attachment_id)
            .map(|attachment| attachment.media().storage_id().clone())
            .ok_or(TaskDomainError::UnknownAttachment { attachment_id })?;

        if let Err(err) = self.host.delete(&storage_id).await {
            warn!(
                task_id = %task_id,
                storage_id = %storage_id,
                error = %err,
                "media host delete failed; removing local record anyway"
            );
        }

        task.remove_attachment(slot, attachment_id, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Flips one attachment's client-visibility flag, returning the new
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownAttachment`] when the slot holds
    /// no such attachment, [`MediaAttachmentError::Forbidden`] unless the
    /// caller is an admin or the assigned worker, and persistence errors
    /// otherwise.
    pub async fn toggle_visibility(
        &self,
        principal: &Principal,
        task_id: TaskId,
        slot: MediaSlot,
        attachment_id: AttachmentId,
    ) -> MediaAttachmentResult<bool> {
        let mut task = self
            .load_authorized(principal, task_id, "change media visibility")
            .await?;
        let visible = task.toggle_attachment_visibility(slot, attachment_id, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(visible)
    }

    /// Sets the visibility flag on every listed attachment present in the
    /// slot, returning how many were matched. Unknown identifiers are
    /// skipped rather than failing the batch.
    ///
    /// # Errors
    ///
    /// Returns [`MediaAttachmentError::Forbidden`] unless the caller is an
    /// admin or the assigned worker, and persistence errors otherwise.
    pub async fn set_visibility(
        &self,
        principal: &Principal,
        task_id: TaskId,
        slot: MediaSlot,
        attachment_ids: &[AttachmentId],
        visible: bool,
    ) -> MediaAttachmentResult<usize> {
        let mut task = self
            .load_authorized(principal, task_id, "change media visibility")
            .await?;
        let matched = task.set_attachments_visibility(slot, attachment_ids, visible, &*self.clock);
        if matched > 0 {
            self.tasks.update(&task).await?;
        }
        Ok(matched)
    }

    async fn load_authorized(
        &self,
        principal: &Principal,
        task_id: TaskId,
        action: &'static str,
    ) -> MediaAttachmentResult<Task> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(MediaAttachmentError::TaskNotFound(task_id))?;
        if !task.permits_mutation(principal) {
            return Err(MediaAttachmentError::Forbidden { action, principal: principal.id });
        }
        Ok(task)
    }
}

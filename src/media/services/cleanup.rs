//! Cross-entity removal of stored media objects.
//!
//! A stored object is referenced from exactly one place: a site cover, a
//! section's reference list, a gallery slot, or a feedback photo. The
//! caller names that owner; the service verifies the reference, asks the
//! host to drop the object, and clears the local record. A storage
//! identifier that the named owner does not reference is rejected before
//! anything is deleted anywhere.

use crate::account::domain::{AccountId, Principal};
use crate::media::domain::StorageId;
use crate::media::ports::MediaHost;
use crate::site::{
    domain::{SectionId, Site, SiteDomainError, SiteId},
    ports::{SiteRepository, SiteRepositoryError},
};
use crate::task::{
    domain::{MediaSlot, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Where a stored media object is referenced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOwner {
    /// A site's cover image.
    SiteCover {
        /// The owning site.
        site_id: SiteId,
    },
    /// A section's reference media list.
    SectionReference {
        /// The site owning the section.
        site_id: SiteId,
        /// The owning section.
        section_id: SectionId,
    },
    /// A task's before or after gallery.
    TaskGallery {
        /// The owning task.
        task_id: TaskId,
        /// Which gallery slot.
        slot: MediaSlot,
    },
    /// A task's feedback photo.
    TaskFeedback {
        /// The owning task.
        task_id: TaskId,
    },
}

/// Service-level errors for media cleanup.
#[derive(Debug, Error)]
pub enum MediaCleanupError {
    /// Task domain validation failed.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),
    /// Site domain validation failed.
    #[error(transparent)]
    SiteDomain(#[from] SiteDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Site persistence failed.
    #[error(transparent)]
    SiteRepository(#[from] SiteRepositoryError),
    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The site was not found.
    #[error("site not found: {0}")]
    SiteNotFound(SiteId),
    /// The named owner does not reference the storage identifier.
    #[error("storage object {storage_id} is not referenced by the named owner")]
    ObjectNotFound {
        /// The unreferenced identifier.
        storage_id: StorageId,
    },
    /// The caller is not permitted to remove the owner's media.
    #[error("principal {principal} may not {action}")]
    Forbidden {
        /// What was attempted.
        action: &'static str,
        /// Who attempted it.
        principal: AccountId,
    },
}

/// Result type for media cleanup operations.
pub type MediaCleanupResult<T> = Result<T, MediaCleanupError>;

/// Cross-entity media removal service.
#[derive(Clone)]
pub struct MediaCleanupService<T, S, H, C>
where
    T: TaskRepository,
    S: SiteRepository,
    H: MediaHost,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    sites: Arc<S>,
    host: Arc<H>,
    clock: Arc<C>,
}

impl<T, S, H, C> MediaCleanupService<T, S, H, C>
where
    T: TaskRepository,
    S: SiteRepository,
    H: MediaHost,
    C: Clock + Send + Sync,
{
    /// Creates a new cleanup service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, sites: Arc<S>, host: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            sites,
            host,
            clock,
        }
    }

    /// Removes a stored object from its named owner and asks the host to
    /// drop it.
    ///
    /// The host call is best-effort and happens only after the reference
    /// is verified, so a mistyped identifier cannot delete someone else's
    /// object. Site-owned media is admin-only; task-owned media follows
    /// the task's mutation rule.
    ///
    /// # Errors
    ///
    /// Returns [`MediaCleanupError::ObjectNotFound`] when the owner does
    /// not reference the identifier, [`MediaCleanupError::Forbidden`] for
    /// unpermitted callers, and domain or persistence errors otherwise.
    pub async fn delete_stored_object(
        &self,
        principal: &Principal,
        owner: MediaOwner,
        storage_id: &StorageId,
    ) -> MediaCleanupResult<()> {
        match owner {
            MediaOwner::SiteCover { site_id } => {
                let mut site = self.load_site_admin(principal, site_id).await?;
                let cleared = site.clear_cover_image(storage_id, &*self.clock);
                if !cleared {
                    return Err(MediaCleanupError::ObjectNotFound {
                        storage_id: storage_id.clone(),
                    });
                }
                self.delete_at_host(storage_id).await;
                self.sites.update(&site).await?;
            }
            MediaOwner::SectionReference {
                site_id,
                section_id,
            } => {
                let mut site = self.load_site_admin(principal, site_id).await?;
                let removed =
                    site.remove_section_reference_media(section_id, storage_id, &*self.clock)?;
                if !removed {
                    return Err(MediaCleanupError::ObjectNotFound {
                        storage_id: storage_id.clone(),
                    });
                }
                self.delete_at_host(storage_id).await;
                self.sites.update(&site).await?;
            }
            MediaOwner::TaskGallery { task_id, slot } => {
                let mut task = self.load_task_permitted(principal, task_id).await?;
                let removed =
                    task.remove_attachments_by_storage(slot, storage_id, &*self.clock);
                if removed.is_empty() {
                    return Err(MediaCleanupError::ObjectNotFound {
                        storage_id: storage_id.clone(),
                    });
                }
                self.delete_at_host(storage_id).await;
                self.tasks.update(&task).await?;
            }
            MediaOwner::TaskFeedback { task_id } => {
                let mut task = self.load_task_permitted(principal, task_id).await?;
                let cleared = task.clear_feedback_photo(storage_id, &*self.clock);
                if !cleared {
                    return Err(MediaCleanupError::ObjectNotFound {
                        storage_id: storage_id.clone(),
                    });
                }
                self.delete_at_host(storage_id).await;
                self.tasks.update(&task).await?;
            }
        }
        Ok(())
    }

    async fn load_site_admin(
        &self,
        principal: &Principal,
        site_id: SiteId,
    ) -> MediaCleanupResult<Site> {
        if !principal.is_admin() {
            return Err(MediaCleanupError::Forbidden {
                action: "remove site media",
                principal: principal.id,
            });
        }
        self.sites
            .find_by_id(site_id)
            .await?
            .ok_or(MediaCleanupError::SiteNotFound(site_id))
    }

    async fn load_task_permitted(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> MediaCleanupResult<Task> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(MediaCleanupError::TaskNotFound(task_id))?;
        if !task.permits_mutation(principal) {
            return Err(MediaCleanupError::Forbidden {
                action: "remove task media",
                principal: principal.id,
            });
        }
        Ok(task)
    }

    async fn delete_at_host(&self, storage_id: &StorageId) {
        if let Err(err) = self.host.delete(storage_id).await {
            warn!(
                storage_id = %storage_id,
                error = %err,
                "media host delete failed; removing local record anyway"
            );
        }
    }
}

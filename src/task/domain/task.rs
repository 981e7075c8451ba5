//! Task aggregate root.

use super::{
    AdminReview, Attachment, AttachmentId, Cost, Feedback, GeoFix, MaterialLine, MediaGallery,
    MediaSlot, SectionMediaSnapshot, TaskDomainError, TaskId, TaskStatus,
};
use crate::account::domain::{AccountId, Principal, Role};
use crate::inventory::domain::{BranchId, InventoryItemId};
use crate::media::domain::{StorageId, StoredMedia};
use crate::site::domain::{SectionId, SiteId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Work order against one site and one or more of its sections.
///
/// The aggregate owns its media lists, materials, review, and feedback
/// outright; everything else is referenced by id. Status only ever changes
/// through the transition methods, which enforce the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    site_id: SiteId,
    section_ids: Vec<SectionId>,
    client_id: AccountId,
    worker_id: Option<AccountId>,
    branch_id: Option<BranchId>,
    status: TaskStatus,
    scheduled_date: DateTime<Utc>,
    estimated_duration_hours: Option<f64>,
    actual_duration_hours: Option<f64>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    start_fix: Option<GeoFix>,
    end_fix: Option<GeoFix>,
    gallery: MediaGallery,
    reference_media: Vec<SectionMediaSnapshot>,
    materials: Vec<MaterialLine>,
    cost: Cost,
    review: Option<AdminReview>,
    feedback: Option<Feedback>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskData {
    /// Target site.
    pub site_id: SiteId,
    /// Target sections; must not be empty.
    pub section_ids: Vec<SectionId>,
    /// Client the work is performed for.
    pub client_id: AccountId,
    /// Branch materials draw from, if any.
    pub branch_id: Option<BranchId>,
    /// When the work is scheduled.
    pub scheduled_date: DateTime<Utc>,
    /// Planned duration in hours, if estimated.
    pub estimated_duration_hours: Option<f64>,
    /// Reference media copied from the target sections.
    pub reference_media: Vec<SectionMediaSnapshot>,
    /// Planned material consumption.
    pub materials: Vec<MaterialLine>,
    /// Cost breakdown.
    pub cost: Cost,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted target site.
    pub site_id: SiteId,
    /// Persisted target sections.
    pub section_ids: Vec<SectionId>,
    /// Persisted client.
    pub client_id: AccountId,
    /// Persisted assigned worker, if any.
    pub worker_id: Option<AccountId>,
    /// Persisted branch, if any.
    pub branch_id: Option<BranchId>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted schedule.
    pub scheduled_date: DateTime<Utc>,
    /// Persisted duration estimate in hours.
    pub estimated_duration_hours: Option<f64>,
    /// Persisted start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted check-in fix.
    pub start_fix: Option<GeoFix>,
    /// Persisted check-out fix.
    pub end_fix: Option<GeoFix>,
    /// Persisted before/after gallery.
    pub gallery: MediaGallery,
    /// Persisted reference media snapshot.
    pub reference_media: Vec<SectionMediaSnapshot>,
    /// Persisted material lines.
    pub materials: Vec<MaterialLine>,
    /// Persisted cost breakdown.
    pub cost: Cost,
    /// Persisted review record, if any.
    pub review: Option<AdminReview>,
    /// Persisted feedback record, if any.
    pub feedback: Option<Feedback>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending, unassigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoSections`] when no section is targeted.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if data.section_ids.is_empty() {
            return Err(TaskDomainError::NoSections);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            site_id: data.site_id,
            section_ids: data.section_ids,
            client_id: data.client_id,
            worker_id: None,
            branch_id: data.branch_id,
            status: TaskStatus::Pending,
            scheduled_date: data.scheduled_date,
            estimated_duration_hours: data.estimated_duration_hours,
            actual_duration_hours: None,
            started_at: None,
            completed_at: None,
            start_fix: None,
            end_fix: None,
            gallery: MediaGallery::new(),
            reference_media: data.reference_media,
            materials: data.materials,
            cost: data.cost,
            review: None,
            feedback: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// The actual duration is re-derived from the persisted timestamps
    /// rather than trusted from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let mut task = Self {
            id: data.id,
            site_id: data.site_id,
            section_ids: data.section_ids,
            client_id: data.client_id,
            worker_id: data.worker_id,
            branch_id: data.branch_id,
            status: data.status,
            scheduled_date: data.scheduled_date,
            estimated_duration_hours: data.estimated_duration_hours,
            actual_duration_hours: None,
            started_at: data.started_at,
            completed_at: data.completed_at,
            start_fix: data.start_fix,
            end_fix: data.end_fix,
            gallery: data.gallery,
            reference_media: data.reference_media,
            materials: data.materials,
            cost: data.cost,
            review: data.review,
            feedback: data.feedback,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        task.recompute_actual_duration();
        task
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the target site.
    #[must_use]
    pub const fn site_id(&self) -> SiteId {
        self.site_id
    }

    /// Returns the target sections.
    #[must_use]
    pub fn section_ids(&self) -> &[SectionId] {
        &self.section_ids
    }

    /// Returns the client the work is for.
    #[must_use]
    pub const fn client_id(&self) -> AccountId {
        self.client_id
    }

    /// Returns the assigned worker, if any.
    #[must_use]
    pub const fn worker_id(&self) -> Option<AccountId> {
        self.worker_id
    }

    /// Returns the branch materials draw from, if any.
    #[must_use]
    pub const fn branch_id(&self) -> Option<BranchId> {
        self.branch_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the scheduled date.
    #[must_use]
    pub const fn scheduled_date(&self) -> DateTime<Utc> {
        self.scheduled_date
    }

    /// Returns the duration estimate in hours, if any.
    #[must_use]
    pub const fn estimated_duration_hours(&self) -> Option<f64> {
        self.estimated_duration_hours
    }

    /// Returns the derived actual duration in hours, if the task ran.
    #[must_use]
    pub const fn actual_duration_hours(&self) -> Option<f64> {
        self.actual_duration_hours
    }

    /// Returns when work started, if it did.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when work completed, if it did.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the check-in GPS fix, if recorded.
    #[must_use]
    pub const fn start_fix(&self) -> Option<GeoFix> {
        self.start_fix
    }

    /// Returns the check-out GPS fix, if recorded.
    #[must_use]
    pub const fn end_fix(&self) -> Option<GeoFix> {
        self.end_fix
    }

    /// Returns the before/after gallery.
    #[must_use]
    pub const fn gallery(&self) -> &MediaGallery {
        &self.gallery
    }

    /// Returns the reference media copied at creation.
    #[must_use]
    pub fn reference_media(&self) -> &[SectionMediaSnapshot] {
        &self.reference_media
    }

    /// Returns the material lines.
    #[must_use]
    pub fn materials(&self) -> &[MaterialLine] {
        &self.materials
    }

    /// Returns the cost breakdown.
    #[must_use]
    pub const fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the review record, if any.
    #[must_use]
    pub const fn review(&self) -> Option<&AdminReview> {
        self.review.as_ref()
    }

    /// Returns the feedback record, if any.
    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the principal may read this task.
    #[must_use]
    pub fn permits_read(&self, principal: &Principal) -> bool {
        match principal.role {
            Role::Admin => true,
            Role::Worker => self.worker_id == Some(principal.id),
            Role::Client => self.client_id == principal.id,
        }
    }

    /// Returns whether the principal may mutate task-owned records.
    ///
    /// Clients never mutate directly; their one write path is feedback,
    /// which has its own gate.
    #[must_use]
    pub fn permits_mutation(&self, principal: &Principal) -> bool {
        match principal.role {
            Role::Admin => true,
            Role::Worker => self.worker_id == Some(principal.id),
            Role::Client => false,
        }
    }

    /// Assigns a worker, moving the task from pending to assigned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::WorkerAlreadyAssigned`] when a worker is
    /// already set and [`TaskDomainError::InvalidTransition`] when the task
    /// is not pending.
    pub fn assign(
        &mut self,
        worker_id: AccountId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.worker_id.is_some() {
            return Err(TaskDomainError::WorkerAlreadyAssigned);
        }
        self.transition(TaskStatus::Assigned)?;
        self.worker_id = Some(worker_id);
        self.touch(clock);
        Ok(())
    }

    /// Starts the work, recording the check-in time and optional GPS fix.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is not
    /// assigned.
    pub fn start(
        &mut self,
        fix: Option<GeoFix>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::InProgress)?;
        let timestamp = clock.utc();
        self.started_at = Some(timestamp);
        self.start_fix = fix;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Completes the work, recording the check-out time and optional GPS
    /// fix, and re-deriving the actual duration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is not
    /// in progress; completing twice fails here.
    pub fn complete(
        &mut self,
        fix: Option<GeoFix>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::Completed)?;
        let timestamp = clock.utc();
        self.completed_at = Some(timestamp);
        self.end_fix = fix;
        self.recompute_actual_duration();
        self.updated_at = timestamp;
        Ok(())
    }

    /// Rejects the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// already rejected.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::Rejected)?;
        self.touch(clock);
        Ok(())
    }

    /// Parks the task in review, recording the review sub-record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// already in review.
    pub fn move_to_review(
        &mut self,
        review: AdminReview,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::Review)?;
        self.review = Some(review);
        self.touch(clock);
        Ok(())
    }

    /// Stamps the confirmation on the material line for an inventory item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownMaterial`] when no line references
    /// the item.
    pub fn confirm_material(
        &mut self,
        item_id: InventoryItemId,
        confirmed_by: AccountId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let line = self
            .materials
            .iter_mut()
            .find(|line| line.item_id() == item_id)
            .ok_or(TaskDomainError::UnknownMaterial { item_id })?;
        line.confirm(confirmed_by, clock.utc());
        self.touch(clock);
        Ok(())
    }

    /// Records client feedback, overwriting any prior record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FeedbackRequiresCompletion`] when the task
    /// is not completed.
    pub fn record_feedback(
        &mut self,
        feedback: Feedback,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Completed {
            return Err(TaskDomainError::FeedbackRequiresCompletion {
                status: self.status,
            });
        }
        self.feedback = Some(feedback);
        self.touch(clock);
        Ok(())
    }

    /// Appends an attachment to a gallery slot.
    pub fn add_attachment(&mut self, slot: MediaSlot, attachment: Attachment, clock: &impl Clock) {
        self.gallery.append(slot, attachment);
        self.touch(clock);
    }

    /// Looks up an attachment by slot and identifier.
    #[must_use]
    pub fn attachment(&self, slot: MediaSlot, attachment_id: AttachmentId) -> Option<&Attachment> {
        self.gallery.attachment(slot, attachment_id)
    }

    /// Removes an attachment, returning the removed entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownAttachment`] when the slot holds no
    /// attachment with that identifier.
    pub fn remove_attachment(
        &mut self,
        slot: MediaSlot,
        attachment_id: AttachmentId,
        clock: &impl Clock,
    ) -> Result<Attachment, TaskDomainError> {
        let removed = self
            .gallery
            .remove(slot, attachment_id)
            .ok_or(TaskDomainError::UnknownAttachment { attachment_id })?;
        self.touch(clock);
        Ok(removed)
    }

    /// Removes every attachment in a slot matching a storage identifier,
    /// returning the removed entries.
    pub fn remove_attachments_by_storage(
        &mut self,
        slot: MediaSlot,
        storage_id: &StorageId,
        clock: &impl Clock,
    ) -> Vec<Attachment> {
        let removed = self.gallery.remove_by_storage(slot, storage_id);
        if !removed.is_empty() {
            self.touch(clock);
        }
        removed
    }

    /// Flips one attachment's client-visibility flag, returning the new
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownAttachment`] when the slot holds no
    /// attachment with that identifier.
    pub fn toggle_attachment_visibility(
        &mut self,
        slot: MediaSlot,
        attachment_id: AttachmentId,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        let visible = self
            .gallery
            .toggle_visibility(slot, attachment_id)
            .ok_or(TaskDomainError::UnknownAttachment { attachment_id })?;
        self.touch(clock);
        Ok(visible)
    }

    /// Sets the visibility flag on every listed attachment present in the
    /// slot, returning how many were matched. Unknown ids are skipped, not
    /// errored.
    pub fn set_attachments_visibility(
        &mut self,
        slot: MediaSlot,
        attachment_ids: &[AttachmentId],
        visible: bool,
        clock: &impl Clock,
    ) -> usize {
        let matched = self.gallery.set_visibility(slot, attachment_ids, visible);
        if matched > 0 {
            self.touch(clock);
        }
        matched
    }

    /// Drops the feedback photo when it matches the given storage
    /// identifier, returning whether it was dropped.
    pub fn clear_feedback_photo(&mut self, storage_id: &StorageId, clock: &impl Clock) -> bool {
        let cleared = self
            .feedback
            .as_mut()
            .is_some_and(|feedback| feedback.clear_photo(storage_id));
        if cleared {
            self.touch(clock);
        }
        cleared
    }

    /// Returns every hosted media object the task owns: gallery attachments
    /// and the feedback photo.
    ///
    /// Reference media snapshots are excluded; those objects belong to the
    /// sections they were copied from.
    #[must_use]
    pub fn hosted_media(&self) -> Vec<StoredMedia> {
        let mut media: Vec<StoredMedia> = self
            .gallery
            .attachments()
            .map(|attachment| attachment.media().clone())
            .collect();
        if let Some(photo) = self.feedback.as_ref().and_then(Feedback::photo) {
            media.push(photo.clone());
        }
        media
    }

    /// Clears every hosted media record: both gallery slots and the
    /// feedback photo.
    pub fn clear_hosted_media(&mut self, clock: &impl Clock) {
        self.gallery.drain_all();
        if let Some(feedback) = self.feedback.as_mut() {
            feedback.take_photo();
        }
        self.touch(clock);
    }

    fn transition(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    fn recompute_actual_duration(&mut self) {
        if let (Some(started), Some(completed)) = (self.started_at, self.completed_at) {
            let seconds = (completed - started).num_seconds();
            #[expect(
                clippy::cast_precision_loss,
                reason = "durations are far below the f64 integer precision limit"
            )]
            #[expect(
                clippy::float_arithmetic,
                reason = "the duration is reported as fractional hours rounded to 2 decimals"
            )]
            let hours = {
                let raw = seconds as f64 / 3600.0;
                (raw * 100.0).round() / 100.0
            };
            self.actual_duration_hours = Some(hours);
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

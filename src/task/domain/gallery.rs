//! Before/after media attachments owned by a task.

use super::{AttachmentId, ParseMediaSlotError};
use crate::account::domain::AccountId;
use crate::media::domain::{StorageId, StoredMedia};
use crate::site::domain::SectionId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two named attachment lists on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    /// State of the sections before work started.
    Before,
    /// State of the sections after work finished.
    After,
}

impl MediaSlot {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for MediaSlot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MediaSlot {
    type Error = ParseMediaSlotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(ParseMediaSlotError(value.to_owned())),
        }
    }
}

/// One uploaded media entry in a task's gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    media: StoredMedia,
    uploaded_by: AccountId,
    uploaded_at: DateTime<Utc>,
    visible_to_client: bool,
}

impl Attachment {
    /// Creates an attachment for an already-hosted media object.
    #[must_use]
    pub fn new(
        media: StoredMedia,
        uploaded_by: AccountId,
        visible_to_client: bool,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AttachmentId::new(),
            media,
            uploaded_by,
            uploaded_at: clock.utc(),
            visible_to_client,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the hosted media descriptor.
    #[must_use]
    pub const fn media(&self) -> &StoredMedia {
        &self.media
    }

    /// Returns who uploaded the media.
    #[must_use]
    pub const fn uploaded_by(&self) -> AccountId {
        self.uploaded_by
    }

    /// Returns when the media was uploaded.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    /// Returns whether the client may see this attachment.
    #[must_use]
    pub const fn visible_to_client(&self) -> bool {
        self.visible_to_client
    }

    pub(crate) const fn set_visibility(&mut self, visible: bool) {
        self.visible_to_client = visible;
    }

    pub(crate) const fn toggle_visibility(&mut self) -> bool {
        self.visible_to_client = !self.visible_to_client;
        self.visible_to_client
    }
}

/// The two ordered attachment lists of a task, addressed by slot and
/// attachment id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaGallery {
    before: Vec<Attachment>,
    after: Vec<Attachment>,
}

impl MediaGallery {
    /// Creates an empty gallery.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Returns the attachments of a slot in upload order.
    #[must_use]
    pub fn slot(&self, slot: MediaSlot) -> &[Attachment] {
        match slot {
            MediaSlot::Before => &self.before,
            MediaSlot::After => &self.after,
        }
    }

    /// Looks up an attachment by slot and identifier.
    #[must_use]
    pub fn attachment(&self, slot: MediaSlot, attachment_id: AttachmentId) -> Option<&Attachment> {
        self.slot(slot)
            .iter()
            .find(|attachment| attachment.id() == attachment_id)
    }

    /// Appends an attachment to a slot.
    pub fn append(&mut self, slot: MediaSlot, attachment: Attachment) {
        self.slot_mut(slot).push(attachment);
    }

    /// Removes an attachment by identifier, returning it when present.
    pub fn remove(&mut self, slot: MediaSlot, attachment_id: AttachmentId) -> Option<Attachment> {
        let entries = self.slot_mut(slot);
        let index = entries
            .iter()
            .position(|attachment| attachment.id() == attachment_id)?;
        Some(entries.remove(index))
    }

    /// Removes every attachment in a slot whose media matches a storage
    /// identifier, returning the removed entries.
    pub fn remove_by_storage(
        &mut self,
        slot: MediaSlot,
        storage_id: &StorageId,
    ) -> Vec<Attachment> {
        let entries = self.slot_mut(slot);
        let mut removed = Vec::new();
        let mut index = 0;
        while index < entries.len() {
            if entries
                .get(index)
                .is_some_and(|attachment| attachment.media().storage_id() == storage_id)
            {
                removed.push(entries.remove(index));
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Flips the visibility flag of one attachment, returning the new value
    /// when the attachment exists.
    pub fn toggle_visibility(
        &mut self,
        slot: MediaSlot,
        attachment_id: AttachmentId,
    ) -> Option<bool> {
        self.slot_mut(slot)
            .iter_mut()
            .find(|attachment| attachment.id() == attachment_id)
            .map(Attachment::toggle_visibility)
    }

    /// Sets the visibility flag on every listed attachment present in the
    /// slot, returning how many were matched. Unknown ids are skipped.
    pub fn set_visibility(
        &mut self,
        slot: MediaSlot,
        attachment_ids: &[AttachmentId],
        visible: bool,
    ) -> usize {
        let mut matched = 0;
        for attachment in self
            .slot_mut(slot)
            .iter_mut()
            .filter(|attachment| attachment_ids.contains(&attachment.id()))
        {
            attachment.set_visibility(visible);
            matched += 1;
        }
        matched
    }

    /// Iterates over every attachment in both slots.
    #[must_use]
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.before.iter().chain(self.after.iter())
    }

    /// Removes and returns every attachment from both slots.
    pub fn drain_all(&mut self) -> Vec<Attachment> {
        let mut drained = std::mem::take(&mut self.before);
        drained.append(&mut self.after);
        drained
    }

    /// Returns whether both slots are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    fn slot_mut(&mut self, slot: MediaSlot) -> &mut Vec<Attachment> {
        match slot {
            MediaSlot::Before => &mut self.before,
            MediaSlot::After => &mut self.after,
        }
    }
}

/// One reference media entry copied from a section at task creation.
///
/// The copy is owned by the task and never re-synced; later edits to the
/// section's reference media must not change what the task recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMediaSnapshot {
    /// Section the media was copied from.
    pub section_id: SectionId,
    /// The copied media descriptor.
    pub media: StoredMedia,
}

impl SectionMediaSnapshot {
    /// Creates a snapshot entry.
    #[must_use]
    pub const fn new(section_id: SectionId, media: StoredMedia) -> Self {
        Self { section_id, media }
    }
}

//! Client feedback recorded against a completed task.

use super::TaskDomainError;
use crate::media::domain::{StorageId, StoredMedia};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Creates a validated rating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::RatingOutOfRange`] when the value is not
    /// between 1 and 5.
    pub const fn new(rating: u8) -> Result<Self, TaskDomainError> {
        if rating == 0 || rating > 5 {
            return Err(TaskDomainError::RatingOutOfRange { rating });
        }
        Ok(Self(rating))
    }

    /// Returns the full-marks rating used by the satisfied shortcut.
    #[must_use]
    pub const fn full() -> Self {
        Self(5)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// At most one feedback record is kept per task; resubmission overwrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    rating: Rating,
    comment: Option<String>,
    attachment_index: Option<u32>,
    photo: Option<StoredMedia>,
    submitted_at: DateTime<Utc>,
    is_satisfied_only: bool,
}

impl Feedback {
    /// Creates a full feedback record.
    #[must_use]
    pub fn new(rating: Rating, clock: &impl Clock) -> Self {
        Self {
            rating,
            comment: None,
            attachment_index: None,
            photo: None,
            submitted_at: clock.utc(),
            is_satisfied_only: false,
        }
    }

    /// Creates the quick "satisfied" record: five stars, no prose.
    #[must_use]
    pub fn satisfied(clock: &impl Clock) -> Self {
        Self {
            rating: Rating::full(),
            comment: None,
            attachment_index: None,
            photo: None,
            submitted_at: clock.utc(),
            is_satisfied_only: true,
        }
    }

    /// Sets the free-text comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the index of the gallery attachment the feedback refers to.
    #[must_use]
    pub const fn with_attachment_index(mut self, index: u32) -> Self {
        self.attachment_index = Some(index);
        self
    }

    /// Attaches a photo supplied by the client.
    #[must_use]
    pub fn with_photo(mut self, photo: StoredMedia) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Returns the rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the referenced gallery attachment index, if any.
    #[must_use]
    pub const fn attachment_index(&self) -> Option<u32> {
        self.attachment_index
    }

    /// Returns the client photo, if any.
    #[must_use]
    pub const fn photo(&self) -> Option<&StoredMedia> {
        self.photo.as_ref()
    }

    /// Returns when the feedback was submitted.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Returns whether this was the quick "satisfied" shortcut.
    #[must_use]
    pub const fn is_satisfied_only(&self) -> bool {
        self.is_satisfied_only
    }

    /// Drops the photo when it matches the given storage identifier,
    /// returning whether it was dropped.
    pub(crate) fn clear_photo(&mut self, storage_id: &StorageId) -> bool {
        let matches = self
            .photo
            .as_ref()
            .is_some_and(|photo| photo.storage_id() == storage_id);
        if matches {
            self.photo = None;
        }
        matches
    }

    /// Removes and returns the photo regardless of identity.
    pub(crate) const fn take_photo(&mut self) -> Option<StoredMedia> {
        self.photo.take()
    }
}

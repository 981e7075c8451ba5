//! Sections embedded in a site, and the section-level dashboard pointer.

use super::{ParseSectionStatusError, SectionId, SiteDomainError};
use crate::media::domain::{StorageId, StoredMedia};
use crate::task::domain::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Working status of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// No work performed yet.
    Pending,
    /// A task is underway on the section.
    InProgress,
    /// The most recent work finished.
    Completed,
    /// Held out of service.
    Maintenance,
}

impl SectionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SectionStatus {
    type Error = ParseSectionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ParseSectionStatusError(value.to_owned())),
        }
    }
}

/// Denormalized pointer to the most recent task transition observed for a
/// section.
///
/// Reflects the last transition the lifecycle engine propagated, which is
/// not necessarily the most recently created task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastTaskSummary {
    /// Status the task reached.
    pub status: TaskStatus,
    /// When the transition was observed.
    pub date: DateTime<Utc>,
    /// The task that transitioned.
    pub task_id: TaskId,
}

impl LastTaskSummary {
    /// Creates a last-task pointer.
    #[must_use]
    pub const fn new(status: TaskStatus, date: DateTime<Utc>, task_id: TaskId) -> Self {
        Self {
            status,
            date,
            task_id,
        }
    }
}

/// Identity-bearing section owned by a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    name: String,
    description: Option<String>,
    area_sqm: Option<f64>,
    status: SectionStatus,
    reference_media: Vec<StoredMedia>,
    last_task: Option<LastTaskSummary>,
}

impl Section {
    /// Creates a pending section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::EmptyName`] when the name is empty after
    /// trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, SiteDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SiteDomainError::EmptyName);
        }

        Ok(Self {
            id: SectionId::new(),
            name: trimmed.to_owned(),
            description: None,
            area_sqm: None,
            status: SectionStatus::Pending,
            reference_media: Vec::new(),
            last_task: None,
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the surface area in square metres.
    #[must_use]
    pub const fn with_area_sqm(mut self, area_sqm: f64) -> Self {
        self.area_sqm = Some(area_sqm);
        self
    }

    /// Returns the section identifier.
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Returns the section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the surface area in square metres, if recorded.
    #[must_use]
    pub const fn area_sqm(&self) -> Option<f64> {
        self.area_sqm
    }

    /// Returns the working status.
    #[must_use]
    pub const fn status(&self) -> SectionStatus {
        self.status
    }

    /// Returns the reference media in display order.
    #[must_use]
    pub fn reference_media(&self) -> &[StoredMedia] {
        &self.reference_media
    }

    /// Returns the last-task pointer, if any transition was observed.
    #[must_use]
    pub const fn last_task(&self) -> Option<&LastTaskSummary> {
        self.last_task.as_ref()
    }

    pub(crate) const fn set_status(&mut self, status: SectionStatus) {
        self.status = status;
    }

    pub(crate) fn add_reference_media(&mut self, media: StoredMedia) {
        self.reference_media.push(media);
    }

    pub(crate) fn remove_reference_media(&mut self, storage_id: &StorageId) -> bool {
        let before = self.reference_media.len();
        self.reference_media
            .retain(|media| media.storage_id() != storage_id);
        self.reference_media.len() != before
    }

    pub(crate) const fn record_last_task(&mut self, summary: LastTaskSummary) {
        self.last_task = Some(summary);
    }
}

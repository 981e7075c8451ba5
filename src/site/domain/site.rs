//! Site aggregate root.

use super::{LastTaskSummary, Section, SectionId, SectionStatus, SiteDomainError, SiteId};
use crate::account::domain::AccountId;
use crate::media::domain::{StorageId, StoredMedia};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Site aggregate root.
///
/// Owns its sections outright; section edits always go through the site so
/// the document is saved as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    id: SiteId,
    client_id: AccountId,
    name: String,
    location: String,
    site_type: String,
    cover_image: Option<StoredMedia>,
    total_tasks: u32,
    completed_tasks: u32,
    last_visit: Option<DateTime<Utc>>,
    sections: Vec<Section>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted site.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSiteData {
    /// Persisted site identifier.
    pub id: SiteId,
    /// Persisted owning client.
    pub client_id: AccountId,
    /// Persisted site name.
    pub name: String,
    /// Persisted location.
    pub location: String,
    /// Persisted site type.
    pub site_type: String,
    /// Persisted cover image, if any.
    pub cover_image: Option<StoredMedia>,
    /// Persisted total-task counter.
    pub total_tasks: u32,
    /// Persisted completed-task counter.
    pub completed_tasks: u32,
    /// Persisted last visit timestamp.
    pub last_visit: Option<DateTime<Utc>>,
    /// Persisted sections in display order.
    pub sections: Vec<Section>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Site {
    /// Creates a new site with no sections and zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::EmptyName`],
    /// [`SiteDomainError::EmptyLocation`], or
    /// [`SiteDomainError::EmptySiteType`] when the corresponding field is
    /// empty after trimming.
    pub fn new(
        client_id: AccountId,
        name: impl Into<String>,
        location: impl Into<String>,
        site_type: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, SiteDomainError> {
        let name_raw = name.into();
        let name_trimmed = name_raw.trim();
        if name_trimmed.is_empty() {
            return Err(SiteDomainError::EmptyName);
        }
        let location_raw = location.into();
        let location_trimmed = location_raw.trim();
        if location_trimmed.is_empty() {
            return Err(SiteDomainError::EmptyLocation);
        }
        let type_raw = site_type.into();
        let type_trimmed = type_raw.trim();
        if type_trimmed.is_empty() {
            return Err(SiteDomainError::EmptySiteType);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: SiteId::new(),
            client_id,
            name: name_trimmed.to_owned(),
            location: location_trimmed.to_owned(),
            site_type: type_trimmed.to_owned(),
            cover_image: None,
            total_tasks: 0,
            completed_tasks: 0,
            last_visit: None,
            sections: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a site from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSiteData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            name: data.name,
            location: data.location,
            site_type: data.site_type,
            cover_image: data.cover_image,
            total_tasks: data.total_tasks,
            completed_tasks: data.completed_tasks,
            last_visit: data.last_visit,
            sections: data.sections,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the site identifier.
    #[must_use]
    pub const fn id(&self) -> SiteId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> AccountId {
        self.client_id
    }

    /// Returns the site name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the site type.
    #[must_use]
    pub fn site_type(&self) -> &str {
        &self.site_type
    }

    /// Returns the cover image, if set.
    #[must_use]
    pub const fn cover_image(&self) -> Option<&StoredMedia> {
        self.cover_image.as_ref()
    }

    /// Returns the number of tasks ever created against the site.
    #[must_use]
    pub const fn total_tasks(&self) -> u32 {
        self.total_tasks
    }

    /// Returns the number of tasks completed against the site.
    #[must_use]
    pub const fn completed_tasks(&self) -> u32 {
        self.completed_tasks
    }

    /// Returns when the site was last visited by a completing worker.
    #[must_use]
    pub const fn last_visit(&self) -> Option<DateTime<Utc>> {
        self.last_visit
    }

    /// Returns the sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
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

    /// Looks up a section by identifier.
    #[must_use]
    pub fn section(&self, section_id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id() == section_id)
    }

    /// Appends a section and returns its identifier.
    pub fn add_section(&mut self, section: Section, clock: &impl Clock) -> SectionId {
        let section_id = section.id();
        self.sections.push(section);
        self.touch(clock);
        section_id
    }

    /// Updates the working status of a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::UnknownSection`] when the section does not
    /// belong to this site.
    pub fn update_section_status(
        &mut self,
        section_id: SectionId,
        status: SectionStatus,
        clock: &impl Clock,
    ) -> Result<(), SiteDomainError> {
        let section = self.section_mut(section_id)?;
        section.set_status(status);
        self.touch(clock);
        Ok(())
    }

    /// Appends a reference media entry to a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::UnknownSection`] when the section does not
    /// belong to this site.
    pub fn add_section_reference_media(
        &mut self,
        section_id: SectionId,
        media: StoredMedia,
        clock: &impl Clock,
    ) -> Result<(), SiteDomainError> {
        let section = self.section_mut(section_id)?;
        section.add_reference_media(media);
        self.touch(clock);
        Ok(())
    }

    /// Removes the reference media entries of a section matching a storage
    /// identifier, returning whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::UnknownSection`] when the section does not
    /// belong to this site.
    pub fn remove_section_reference_media(
        &mut self,
        section_id: SectionId,
        storage_id: &StorageId,
        clock: &impl Clock,
    ) -> Result<bool, SiteDomainError> {
        let section = self.section_mut(section_id)?;
        let removed = section.remove_reference_media(storage_id);
        if removed {
            self.touch(clock);
        }
        Ok(removed)
    }

    /// Records a task transition on every listed section that belongs to
    /// this site.
    pub fn record_last_task(
        &mut self,
        section_ids: &[SectionId],
        summary: LastTaskSummary,
        clock: &impl Clock,
    ) {
        for section in self
            .sections
            .iter_mut()
            .filter(|section| section_ids.contains(&section.id()))
        {
            section.record_last_task(summary);
        }
        self.touch(clock);
    }

    /// Sets the cover image.
    pub fn set_cover_image(&mut self, media: StoredMedia, clock: &impl Clock) {
        self.cover_image = Some(media);
        self.touch(clock);
    }

    /// Clears the cover image when it matches the given storage identifier,
    /// returning whether it was cleared.
    pub fn clear_cover_image(&mut self, storage_id: &StorageId, clock: &impl Clock) -> bool {
        let matches = self
            .cover_image
            .as_ref()
            .is_some_and(|media| media.storage_id() == storage_id);
        if matches {
            self.cover_image = None;
            self.touch(clock);
        }
        matches
    }

    /// Records one more task created against the site.
    pub fn record_task_created(&mut self, clock: &impl Clock) {
        self.total_tasks = self.total_tasks.saturating_add(1);
        self.touch(clock);
    }

    /// Records a completed visit: bumps the completed counter and stamps the
    /// visit time.
    pub fn record_completion(&mut self, at: DateTime<Utc>, clock: &impl Clock) {
        self.completed_tasks = self.completed_tasks.saturating_add(1);
        self.last_visit = Some(at);
        self.touch(clock);
    }

    fn section_mut(&mut self, section_id: SectionId) -> Result<&mut Section, SiteDomainError> {
        self.sections
            .iter_mut()
            .find(|section| section.id() == section_id)
            .ok_or(SiteDomainError::UnknownSection { section_id })
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

//! Service layer for site and section management.

use crate::account::domain::AccountId;
use crate::media::domain::StoredMedia;
use crate::site::{
    domain::{Section, SectionId, SectionStatus, Site, SiteDomainError, SiteId},
    ports::{SiteRepository, SiteRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a site.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSiteRequest {
    client_id: AccountId,
    name: String,
    location: String,
    site_type: String,
    cover_image: Option<StoredMedia>,
}

impl CreateSiteRequest {
    /// Creates a site creation request.
    #[must_use]
    pub fn new(
        client_id: AccountId,
        name: impl Into<String>,
        location: impl Into<String>,
        site_type: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            name: name.into(),
            location: location.into(),
            site_type: site_type.into(),
            cover_image: None,
        }
    }

    /// Sets the cover image descriptor.
    #[must_use]
    pub fn with_cover_image(mut self, media: StoredMedia) -> Self {
        self.cover_image = Some(media);
        self
    }
}

/// Request payload for adding a section to a site.
#[derive(Debug, Clone, PartialEq)]
pub struct AddSectionRequest {
    name: String,
    description: Option<String>,
    area_sqm: Option<f64>,
}

impl AddSectionRequest {
    /// Creates a section request.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            area_sqm: None,
        }
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
}

/// Service-level errors for site registry operations.
#[derive(Debug, Error)]
pub enum SiteRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SiteDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SiteRepositoryError),
    /// The requested site does not exist.
    #[error("site not found: {0}")]
    SiteNotFound(SiteId),
}

/// Result type for site registry operations.
pub type SiteRegistryResult<T> = Result<T, SiteRegistryError>;

/// Site and section management service.
#[derive(Clone)]
pub struct SiteRegistryService<R, C>
where
    R: SiteRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SiteRegistryService<R, C>
where
    R: SiteRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a site for a client.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRegistryError::Domain`] for blank fields and
    /// [`SiteRegistryError::Repository`] when persistence fails.
    pub async fn create_site(&self, request: CreateSiteRequest) -> SiteRegistryResult<Site> {
        let mut site = Site::new(
            request.client_id,
            request.name,
            request.location,
            request.site_type,
            &*self.clock,
        )?;
        if let Some(media) = request.cover_image {
            site.set_cover_image(media, &*self.clock);
        }
        self.repository.store(&site).await?;
        Ok(site)
    }

    /// Fetches a site by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRegistryError::SiteNotFound`] when the site does not
    /// exist.
    pub async fn get_site(&self, site_id: SiteId) -> SiteRegistryResult<Site> {
        self.repository
            .find_by_id(site_id)
            .await?
            .ok_or(SiteRegistryError::SiteNotFound(site_id))
    }

    /// Adds a section to a site and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRegistryError::SiteNotFound`] when the site does not
    /// exist and [`SiteRegistryError::Domain`] for a blank section name.
    pub async fn add_section(
        &self,
        site_id: SiteId,
        request: AddSectionRequest,
    ) -> SiteRegistryResult<SectionId> {
        let mut site = self.get_site(site_id).await?;

        let mut section = Section::new(request.name)?;
        if let Some(description) = request.description {
            section = section.with_description(description);
        }
        if let Some(area_sqm) = request.area_sqm {
            section = section.with_area_sqm(area_sqm);
        }

        let section_id = site.add_section(section, &*self.clock);
        self.repository.update(&site).await?;
        Ok(section_id)
    }

    /// Updates the working status of a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRegistryError::SiteNotFound`] when the site does not
    /// exist and [`SiteRegistryError::Domain`] when the section does not
    /// belong to it.
    pub async fn update_section_status(
        &self,
        site_id: SiteId,
        section_id: SectionId,
        status: SectionStatus,
    ) -> SiteRegistryResult<()> {
        let mut site = self.get_site(site_id).await?;
        site.update_section_status(section_id, status, &*self.clock)?;
        self.repository.update(&site).await?;
        Ok(())
    }

    /// Appends a reference media entry to a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRegistryError::SiteNotFound`] when the site does not
    /// exist and [`SiteRegistryError::Domain`] when the section does not
    /// belong to it.
    pub async fn add_section_reference_media(
        &self,
        site_id: SiteId,
        section_id: SectionId,
        media: StoredMedia,
    ) -> SiteRegistryResult<()> {
        let mut site = self.get_site(site_id).await?;
        site.add_section_reference_media(section_id, media, &*self.clock)?;
        self.repository.update(&site).await?;
        Ok(())
    }

    /// Lists every site owned by a client.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRegistryError::Repository`] when the lookup fails.
    pub async fn list_for_client(&self, client_id: AccountId) -> SiteRegistryResult<Vec<Site>> {
        Ok(self.repository.list_for_client(client_id).await?)
    }
}

//! Repository port for site persistence and counter maintenance.

use crate::account::domain::AccountId;
use crate::site::domain::{LastTaskSummary, SectionId, Site, SiteId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for site repository operations.
pub type SiteRepositoryResult<T> = Result<T, SiteRepositoryError>;

/// Site persistence contract.
///
/// Counter bumps and last-task propagation are store-side operations so the
/// lifecycle cascade never does read-modify-write on shared counters.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Stores a new site.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::DuplicateSite`] when the site
    /// identifier already exists.
    async fn store(&self, site: &Site) -> SiteRepositoryResult<()>;

    /// Finds a site by identifier.
    ///
    /// Returns `None` when the site does not exist.
    async fn find_by_id(&self, id: SiteId) -> SiteRepositoryResult<Option<Site>>;

    /// Persists changes to an existing site as one whole-document save.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::NotFound`] when the site does not
    /// exist.
    async fn update(&self, site: &Site) -> SiteRepositoryResult<()>;

    /// Atomically increments the total-task counter.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::NotFound`] when the site does not
    /// exist.
    async fn increment_total_tasks(&self, site_id: SiteId) -> SiteRepositoryResult<()>;

    /// Atomically increments the completed-task counter and stamps the last
    /// visit in one update.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::NotFound`] when the site does not
    /// exist.
    async fn record_completion(
        &self,
        site_id: SiteId,
        at: DateTime<Utc>,
    ) -> SiteRepositoryResult<()>;

    /// Writes the last-task pointer onto every listed section of the site.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::NotFound`] when the site does not
    /// exist.
    async fn record_last_task(
        &self,
        site_id: SiteId,
        section_ids: &[SectionId],
        summary: LastTaskSummary,
    ) -> SiteRepositoryResult<()>;

    /// Lists every site owned by a client.
    async fn list_for_client(&self, client_id: AccountId) -> SiteRepositoryResult<Vec<Site>>;
}

/// Errors returned by site repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SiteRepositoryError {
    /// A site with the same identifier already exists.
    #[error("duplicate site identifier: {0}")]
    DuplicateSite(SiteId),

    /// The site was not found.
    #[error("site not found: {0}")]
    NotFound(SiteId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SiteRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

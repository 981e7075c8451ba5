//! Thread-safe in-memory site repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::domain::AccountId;
use crate::site::{
    domain::{LastTaskSummary, SectionId, Site, SiteId},
    ports::{SiteRepository, SiteRepositoryError, SiteRepositoryResult},
};

/// Thread-safe in-memory site repository.
///
/// Holds its own clock so counter bumps and pointer propagation can stamp
/// `updated_at` the way the store-side updates would.
#[derive(Debug, Clone)]
pub struct InMemorySiteRepository<C: Clock + Send + Sync> {
    state: Arc<RwLock<HashMap<SiteId, Site>>>,
    clock: C,
}

impl<C: Clock + Send + Sync> InMemorySiteRepository<C> {
    /// Creates an empty in-memory repository with the given clock.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> SiteRepository for InMemorySiteRepository<C> {
    async fn store(&self, site: &Site) -> SiteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&site.id()) {
            return Err(SiteRepositoryError::DuplicateSite(site.id()));
        }
        state.insert(site.id(), site.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SiteId) -> SiteRepositoryResult<Option<Site>> {
        let state = self.state.read().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn update(&self, site: &Site) -> SiteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&site.id()) {
            return Err(SiteRepositoryError::NotFound(site.id()));
        }
        state.insert(site.id(), site.clone());
        Ok(())
    }

    async fn increment_total_tasks(&self, site_id: SiteId) -> SiteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let site = state
            .get_mut(&site_id)
            .ok_or(SiteRepositoryError::NotFound(site_id))?;
        site.record_task_created(&self.clock);
        Ok(())
    }

    async fn record_completion(
        &self,
        site_id: SiteId,
        at: DateTime<Utc>,
    ) -> SiteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let site = state
            .get_mut(&site_id)
            .ok_or(SiteRepositoryError::NotFound(site_id))?;
        site.record_completion(at, &self.clock);
        Ok(())
    }

    async fn record_last_task(
        &self,
        site_id: SiteId,
        section_ids: &[SectionId],
        summary: LastTaskSummary,
    ) -> SiteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let site = state
            .get_mut(&site_id)
            .ok_or(SiteRepositoryError::NotFound(site_id))?;
        site.record_last_task(section_ids, summary, &self.clock);
        Ok(())
    }

    async fn list_for_client(&self, client_id: AccountId) -> SiteRepositoryResult<Vec<Site>> {
        let state = self.state.read().map_err(|err| {
            SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut sites: Vec<Site> = state
            .values()
            .filter(|site| site.client_id() == client_id)
            .cloned()
            .collect();
        sites.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(sites)
    }
}

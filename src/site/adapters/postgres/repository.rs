//! `PostgreSQL` repository implementation for site storage.
//!
//! Sections live inside the site row as a `Jsonb` column; counter bumps are
//! SQL arithmetic, and last-task propagation rewrites the sections document
//! under a row lock.

use super::{
    models::{NewSiteRow, SiteRow},
    schema::sites,
};
use crate::account::domain::AccountId;
use crate::site::{
    domain::{LastTaskSummary, PersistedSiteData, Section, SectionId, Site, SiteId},
    ports::{SiteRepository, SiteRepositoryError, SiteRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by site adapters.
pub type SitePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed site repository.
#[derive(Debug, Clone)]
pub struct PostgresSiteRepository {
    pool: SitePgPool,
}

impl From<DieselError> for SiteRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresSiteRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SitePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SiteRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SiteRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SiteRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SiteRepositoryError::persistence)?
    }
}

#[async_trait]
impl SiteRepository for PostgresSiteRepository {
    async fn store(&self, site: &Site) -> SiteRepositoryResult<()> {
        let site_id = site.id();
        let new_row = to_new_row(site)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(sites::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SiteRepositoryError::DuplicateSite(site_id)
                    }
                    _ => SiteRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SiteId) -> SiteRepositoryResult<Option<Site>> {
        self.run_blocking(move |connection| {
            let row = sites::table
                .filter(sites::id.eq(id.into_inner()))
                .select(SiteRow::as_select())
                .first::<SiteRow>(connection)
                .optional()
                .map_err(SiteRepositoryError::persistence)?;
            row.map(row_to_site).transpose()
        })
        .await
    }

    async fn update(&self, site: &Site) -> SiteRepositoryResult<()> {
        let site_id = site.id();
        let row = to_new_row(site)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(sites::table.filter(sites::id.eq(site_id.into_inner())))
                .set((
                    sites::name.eq(row.name),
                    sites::location.eq(row.location),
                    sites::site_type.eq(row.site_type),
                    sites::cover_image.eq(row.cover_image),
                    sites::last_visit.eq(row.last_visit),
                    sites::sections.eq(row.sections),
                    sites::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(SiteRepositoryError::persistence)?;

            if updated == 0 {
                return Err(SiteRepositoryError::NotFound(site_id));
            }
            Ok(())
        })
        .await
    }

    async fn increment_total_tasks(&self, site_id: SiteId) -> SiteRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(sites::table.filter(sites::id.eq(site_id.into_inner())))
                .set((
                    sites::total_tasks.eq(sites::total_tasks + 1),
                    sites::updated_at.eq(now),
                ))
                .execute(connection)
                .map_err(SiteRepositoryError::persistence)?;

            if updated == 0 {
                return Err(SiteRepositoryError::NotFound(site_id));
            }
            Ok(())
        })
        .await
    }

    async fn record_completion(
        &self,
        site_id: SiteId,
        at: DateTime<Utc>,
    ) -> SiteRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(sites::table.filter(sites::id.eq(site_id.into_inner())))
                .set((
                    sites::completed_tasks.eq(sites::completed_tasks + 1),
                    sites::last_visit.eq(Some(at)),
                    sites::updated_at.eq(now),
                ))
                .execute(connection)
                .map_err(SiteRepositoryError::persistence)?;

            if updated == 0 {
                return Err(SiteRepositoryError::NotFound(site_id));
            }
            Ok(())
        })
        .await
    }

    async fn record_last_task(
        &self,
        site_id: SiteId,
        section_ids: &[SectionId],
        summary: LastTaskSummary,
    ) -> SiteRepositoryResult<()> {
        let targets = section_ids.to_vec();

        self.run_blocking(move |connection| {
            connection.transaction::<_, SiteRepositoryError, _>(|transaction| {
                // Row lock keeps two concurrent propagations from losing
                // each other's pointer writes.
                let stored: serde_json::Value = sites::table
                    .filter(sites::id.eq(site_id.into_inner()))
                    .select(sites::sections)
                    .for_update()
                    .first(transaction)
                    .map_err(|err| match err {
                        DieselError::NotFound => SiteRepositoryError::NotFound(site_id),
                        _ => SiteRepositoryError::persistence(err),
                    })?;

                let mut sections: Vec<Section> = serde_json::from_value(stored)
                    .map_err(SiteRepositoryError::persistence)?;
                for section in sections
                    .iter_mut()
                    .filter(|section| targets.contains(&section.id()))
                {
                    section.record_last_task(summary);
                }
                let rewritten =
                    serde_json::to_value(&sections).map_err(SiteRepositoryError::persistence)?;

                diesel::update(sites::table.filter(sites::id.eq(site_id.into_inner())))
                    .set((sites::sections.eq(rewritten), sites::updated_at.eq(now)))
                    .execute(transaction)
                    .map_err(SiteRepositoryError::persistence)?;
                Ok(())
            })
        })
        .await
    }

    async fn list_for_client(&self, client_id: AccountId) -> SiteRepositoryResult<Vec<Site>> {
        self.run_blocking(move |connection| {
            let rows = sites::table
                .filter(sites::client_id.eq(client_id.into_inner()))
                .order(sites::name.asc())
                .select(SiteRow::as_select())
                .load::<SiteRow>(connection)
                .map_err(SiteRepositoryError::persistence)?;
            rows.into_iter().map(row_to_site).collect()
        })
        .await
    }
}

fn to_new_row(site: &Site) -> SiteRepositoryResult<NewSiteRow> {
    let total_tasks =
        i32::try_from(site.total_tasks()).map_err(SiteRepositoryError::persistence)?;
    let completed_tasks =
        i32::try_from(site.completed_tasks()).map_err(SiteRepositoryError::persistence)?;
    let cover_image = site
        .cover_image()
        .map(serde_json::to_value)
        .transpose()
        .map_err(SiteRepositoryError::persistence)?;
    let sections =
        serde_json::to_value(site.sections()).map_err(SiteRepositoryError::persistence)?;

    Ok(NewSiteRow {
        id: site.id().into_inner(),
        client_id: site.client_id().into_inner(),
        name: site.name().to_owned(),
        location: site.location().to_owned(),
        site_type: site.site_type().to_owned(),
        cover_image,
        total_tasks,
        completed_tasks,
        last_visit: site.last_visit(),
        sections,
        created_at: site.created_at(),
        updated_at: site.updated_at(),
    })
}

fn row_to_site(row: SiteRow) -> SiteRepositoryResult<Site> {
    let total_tasks = u32::try_from(row.total_tasks).map_err(SiteRepositoryError::persistence)?;
    let completed_tasks =
        u32::try_from(row.completed_tasks).map_err(SiteRepositoryError::persistence)?;
    let cover_image = row
        .cover_image
        .map(serde_json::from_value)
        .transpose()
        .map_err(SiteRepositoryError::persistence)?;
    let sections: Vec<Section> =
        serde_json::from_value(row.sections).map_err(SiteRepositoryError::persistence)?;

    Ok(Site::from_persisted(PersistedSiteData {
        id: SiteId::from_uuid(row.id),
        client_id: AccountId::from_uuid(row.client_id),
        name: row.name,
        location: row.location,
        site_type: row.site_type,
        cover_image,
        total_tasks,
        completed_tasks,
        last_visit: row.last_visit,
        sections,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

//! `PostgreSQL` repository implementation for task storage.
//!
//! Status-guarded writes run as filtered updates on `(id, status)`; a
//! zero-row result is diagnosed with a follow-up read to tell a missing
//! task from a lost status race.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::account::domain::AccountId;
use crate::inventory::domain::BranchId;
use crate::site::domain::{SectionId, SiteId};
use crate::task::{
    domain::{Cost, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Stored status values that mark a task as finished.
const TERMINAL_STATUSES: [&str; 2] = ["completed", "rejected"];

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn update_guarded(
        &self,
        task: &Task,
        expected_status: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table.filter(
                    tasks::id
                        .eq(task_id.into_inner())
                        .and(tasks::status.eq(expected_status.as_str())),
                ),
            )
            .set(&row)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated == 0 {
                return Err(diagnose_guard_failure(connection, task_id, expected_status));
            }
            Ok(())
        })
        .await
    }

    async fn list_for_worker(&self, worker_id: AccountId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::worker_id.eq(worker_id.into_inner()))
                .order(tasks::scheduled_date.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_for_site(&self, site_id: SiteId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::site_id.eq(site_id.into_inner()))
                .order(tasks::scheduled_date.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_terminal_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(
                    tasks::status
                        .eq_any(TERMINAL_STATUSES)
                        .and(tasks::updated_at.lt(cutoff)),
                )
                .order(tasks::updated_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Works out why a guarded update matched no row.
fn diagnose_guard_failure(
    connection: &mut PgConnection,
    task_id: TaskId,
    expected: TaskStatus,
) -> TaskRepositoryError {
    let stored: Result<Option<String>, _> = tasks::table
        .filter(tasks::id.eq(task_id.into_inner()))
        .select(tasks::status)
        .first(connection)
        .optional();

    match stored {
        Ok(None) => TaskRepositoryError::NotFound(task_id),
        Ok(Some(raw)) => match TaskStatus::try_from(raw.as_str()) {
            Ok(actual) => TaskRepositoryError::StatusConflict {
                task_id,
                expected,
                actual,
            },
            Err(err) => TaskRepositoryError::persistence(err),
        },
        Err(err) => TaskRepositoryError::persistence(err),
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let section_ids = task
        .section_ids()
        .iter()
        .map(|section_id| section_id.into_inner())
        .collect();
    let start_fix = task
        .start_fix()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let end_fix = task
        .end_fix()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let gallery = serde_json::to_value(task.gallery()).map_err(TaskRepositoryError::persistence)?;
    let reference_media =
        serde_json::to_value(task.reference_media()).map_err(TaskRepositoryError::persistence)?;
    let materials =
        serde_json::to_value(task.materials()).map_err(TaskRepositoryError::persistence)?;
    let review = task
        .review()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let feedback = task
        .feedback()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        site_id: task.site_id().into_inner(),
        section_ids,
        client_id: task.client_id().into_inner(),
        worker_id: task.worker_id().map(AccountId::into_inner),
        branch_id: task.branch_id().map(BranchId::into_inner),
        status: task.status().as_str().to_owned(),
        scheduled_date: task.scheduled_date(),
        estimated_duration_hours: task.estimated_duration_hours(),
        started_at: task.started_at(),
        completed_at: task.completed_at(),
        start_fix,
        end_fix,
        gallery,
        reference_media,
        materials,
        cost_labor: task.cost().labor(),
        cost_materials: task.cost().materials(),
        review,
        feedback,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let cost =
        Cost::new(row.cost_labor, row.cost_materials).map_err(TaskRepositoryError::persistence)?;
    let start_fix = row
        .start_fix
        .map(serde_json::from_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let end_fix = row
        .end_fix
        .map(serde_json::from_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let gallery = serde_json::from_value(row.gallery).map_err(TaskRepositoryError::persistence)?;
    let reference_media =
        serde_json::from_value(row.reference_media).map_err(TaskRepositoryError::persistence)?;
    let materials =
        serde_json::from_value(row.materials).map_err(TaskRepositoryError::persistence)?;
    let review = row
        .review
        .map(serde_json::from_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let feedback = row
        .feedback
        .map(serde_json::from_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        site_id: SiteId::from_uuid(row.site_id),
        section_ids: row.section_ids.into_iter().map(SectionId::from_uuid).collect(),
        client_id: AccountId::from_uuid(row.client_id),
        worker_id: row.worker_id.map(AccountId::from_uuid),
        branch_id: row.branch_id.map(BranchId::from_uuid),
        status,
        scheduled_date: row.scheduled_date,
        estimated_duration_hours: row.estimated_duration_hours,
        started_at: row.started_at,
        completed_at: row.completed_at,
        start_fix,
        end_fix,
        gallery,
        reference_media,
        materials,
        cost,
        review,
        feedback,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

//! Task lifecycle orchestration across sites, accounts, and inventory.
//!
//! Every status-changing write is guarded on the status the service read,
//! so two callers racing the same transition resolve to one winner; the
//! loser sees a status conflict and no side effects. Cross-entity updates
//! (site counters, account counters, section pointers, stock levels) run
//! only on the winning path.

use crate::account::{
    domain::{AccountId, Principal},
    ports::{AccountRepository, AccountRepositoryError, NotificationDispatcher},
};
use crate::inventory::{
    domain::{BranchId, InventoryItemId},
    ports::{InventoryRepository, InventoryRepositoryError, StockDemand},
};
use crate::site::{
    domain::{LastTaskSummary, SectionId, SiteId},
    ports::{SiteRepository, SiteRepositoryError},
};
use crate::task::{
    domain::{
        AdminReview, Cost, GeoFix, MaterialLine, NewTaskData, ReviewVerdict,
        SectionMediaSnapshot, Task, TaskDomainError, TaskId, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    site_id: SiteId,
    section_ids: Vec<SectionId>,
    scheduled_date: DateTime<Utc>,
    client_id: Option<AccountId>,
    branch_id: Option<BranchId>,
    estimated_duration_hours: Option<f64>,
    labor_cost: f64,
    materials_cost: f64,
    materials: Vec<MaterialLine>,
}

impl CreateTaskRequest {
    /// Creates a request targeting the given site and sections.
    #[must_use]
    pub const fn new(
        site_id: SiteId,
        section_ids: Vec<SectionId>,
        scheduled_date: DateTime<Utc>,
    ) -> Self {
        Self {
            site_id,
            section_ids,
            scheduled_date,
            client_id: None,
            branch_id: None,
            estimated_duration_hours: None,
            labor_cost: 0.0,
            materials_cost: 0.0,
            materials: Vec::new(),
        }
    }

    /// Bills the task to this client instead of the site owner.
    #[must_use]
    pub const fn with_client_id(mut self, client_id: AccountId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Draws materials from this branch.
    #[must_use]
    pub const fn with_branch_id(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    /// Sets the planned duration in hours.
    #[must_use]
    pub const fn with_estimated_duration_hours(mut self, hours: f64) -> Self {
        self.estimated_duration_hours = Some(hours);
        self
    }

    /// Sets the labor cost component.
    #[must_use]
    pub const fn with_labor_cost(mut self, labor_cost: f64) -> Self {
        self.labor_cost = labor_cost;
        self
    }

    /// Sets the materials cost component.
    #[must_use]
    pub const fn with_materials_cost(mut self, materials_cost: f64) -> Self {
        self.materials_cost = materials_cost;
        self
    }

    /// Sets the planned material consumption.
    #[must_use]
    pub fn with_materials(mut self, materials: Vec<MaterialLine>) -> Self {
        self.materials = materials;
        self
    }
}

/// Service-level errors for lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Site persistence failed.
    #[error(transparent)]
    SiteRepository(#[from] SiteRepositoryError),
    /// Account persistence failed.
    #[error(transparent)]
    AccountRepository(#[from] AccountRepositoryError),
    /// Stock deduction or restock failed.
    #[error(transparent)]
    Inventory(#[from] InventoryRepositoryError),
    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The target site was not found.
    #[error("site not found: {0}")]
    SiteNotFound(SiteId),
    /// The worker account was not found.
    #[error("worker account not found: {0}")]
    WorkerNotFound(AccountId),
    /// A targeted section does not belong to the target site.
    #[error("section {section_id} does not belong to site {site_id}")]
    SectionNotInSite {
        /// The target site.
        site_id: SiteId,
        /// The section that was not found on it.
        section_id: SectionId,
    },
    /// The account exists but cannot take assignments.
    #[error("account {0} cannot take assignments")]
    NotAssignable(AccountId),
    /// The caller is not permitted to perform the operation.
    #[error("principal {principal} may not {action}")]
    Forbidden {
        /// What was attempted.
        action: &'static str,
        /// Who attempted it.
        principal: AccountId,
    },
}

/// Result type for lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Work-order lifecycle service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, S, A, I, N, C>
where
    T: TaskRepository,
    S: SiteRepository,
    A: AccountRepository,
    I: InventoryRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    sites: Arc<S>,
    accounts: Arc<A>,
    inventory: Arc<I>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<T, S, A, I, N, C> TaskLifecycleService<T, S, A, I, N, C>
where
    T: TaskRepository,
    S: SiteRepository,
    A: AccountRepository,
    I: InventoryRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        sites: Arc<S>,
        accounts: Arc<A>,
        inventory: Arc<I>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            sites,
            accounts,
            inventory,
            notifier,
            clock,
        }
    }

    /// Creates a pending task, snapshotting the targeted sections' reference
    /// media and bumping the site's total-task counter.
    ///
    /// When no client is named the task bills to the site owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin callers,
    /// [`TaskLifecycleError::SiteNotFound`] or
    /// [`TaskLifecycleError::SectionNotInSite`] for bad targets, and
    /// domain or persistence errors otherwise.
    pub async fn create_task(
        &self,
        principal: &Principal,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        if !principal.is_admin() {
            return Err(TaskLifecycleError::Forbidden {
                action: "create tasks",
                principal: principal.id,
            });
        }

        let site = self
            .sites
            .find_by_id(request.site_id)
            .await?
            .ok_or(TaskLifecycleError::SiteNotFound(request.site_id))?;

        // Snapshot, not reference: the task owns its copy and later edits
        // to the section's media must not reach it.
        let mut reference_media = Vec::new();
        for section_id in &request.section_ids {
            let section =
                site.section(*section_id)
                    .ok_or(TaskLifecycleError::SectionNotInSite {
                        site_id: request.site_id,
                        section_id: *section_id,
                    })?;
            for media in section.reference_media() {
                reference_media.push(SectionMediaSnapshot::new(*section_id, media.clone()));
            }
        }

        let cost = Cost::new(request.labor_cost, request.materials_cost)?;
        let client_id = request.client_id.unwrap_or_else(|| site.client_id());
        let task = Task::new(
            NewTaskData {
                site_id: request.site_id,
                section_ids: request.section_ids,
                client_id,
                branch_id: request.branch_id,
                scheduled_date: request.scheduled_date,
                estimated_duration_hours: request.estimated_duration_hours,
                reference_media,
                materials: request.materials,
                cost,
            },
            &*self.clock,
        )?;

        self.tasks.store(&task).await?;
        self.sites.increment_total_tasks(task.site_id()).await?;
        Ok(task)
    }

    /// Assigns a worker, deducting every planned material from stock first.
    ///
    /// The deduction is all-or-nothing; a shortfall leaves the task pending
    /// and stock untouched. When the guarded status write loses a race the
    /// deduction is compensated by restocking.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin callers,
    /// [`TaskLifecycleError::WorkerNotFound`] or
    /// [`TaskLifecycleError::NotAssignable`] for bad workers, and stock,
    /// domain, or persistence errors otherwise.
    pub async fn assign_worker(
        &self,
        principal: &Principal,
        task_id: TaskId,
        worker_id: AccountId,
    ) -> TaskLifecycleResult<Task> {
        if !principal.is_admin() {
            return Err(TaskLifecycleError::Forbidden {
                action: "assign workers",
                principal: principal.id,
            });
        }

        let mut task = self.load_task(task_id).await?;
        let worker = self
            .accounts
            .find_by_id(worker_id)
            .await?
            .ok_or(TaskLifecycleError::WorkerNotFound(worker_id))?;
        if !worker.is_assignable() {
            return Err(TaskLifecycleError::NotAssignable(worker_id));
        }

        // Validate the transition before spending stock; a domain rejection
        // here has no side effects to unwind.
        let prior_status = task.status();
        task.assign(worker_id, &*self.clock)?;

        let demands = material_demands(&task);
        if !demands.is_empty() {
            self.inventory.deduct_all(&demands).await?;
        }

        if let Err(err) = self.tasks.update_guarded(&task, prior_status).await {
            // Another writer moved the task first; give the stock back.
            self.restock_demands(&demands).await;
            return Err(err.into());
        }

        if let Err(err) = self
            .notifier
            .task_assigned(worker_id, task_id, task.scheduled_date())
            .await
        {
            warn!(
                task_id = %task_id,
                worker_id = %worker_id,
                error = %err,
                "assignment notification failed"
            );
        }

        Ok(task)
    }

    /// Starts the work, recording the check-in time and optional GPS fix.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the caller is an
    /// admin or the assigned worker, and domain or persistence errors
    /// otherwise.
    pub async fn start_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
        fix: Option<GeoFix>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_task(task_id).await?;
        if !task.permits_mutation(principal) {
            return Err(TaskLifecycleError::Forbidden {
                action: "start this task",
                principal: principal.id,
            });
        }

        let prior_status = task.status();
        task.start(fix, &*self.clock)?;
        self.tasks.update_guarded(&task, prior_status).await?;
        Ok(task)
    }

    /// Completes the work and runs the cross-entity completion cascade:
    /// site counters and last visit, per-section last-task pointers, and
    /// the client and worker completed-task counters.
    ///
    /// The cascade runs only after the guarded write wins, so two racing
    /// completions bump every counter exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the caller is an
    /// admin or the assigned worker, and domain or persistence errors
    /// otherwise; the racing loser surfaces
    /// [`TaskRepositoryError::StatusConflict`].
    pub async fn complete_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
        fix: Option<GeoFix>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_task(task_id).await?;
        if !task.permits_mutation(principal) {
            return Err(TaskLifecycleError::Forbidden {
                action: "complete this task",
                principal: principal.id,
            });
        }

        let prior_status = task.status();
        task.complete(fix, &*self.clock)?;
        self.tasks.update_guarded(&task, prior_status).await?;

        let completed_at = task.completed_at().unwrap_or_else(|| self.clock.utc());
        self.sites
            .record_completion(task.site_id(), completed_at)
            .await?;
        self.sites
            .record_last_task(
                task.site_id(),
                task.section_ids(),
                LastTaskSummary::new(TaskStatus::Completed, completed_at, task.id()),
            )
            .await?;
        self.accounts
            .increment_completed_tasks(task.client_id())
            .await?;
        if let Some(worker_id) = task.worker_id() {
            self.accounts.increment_completed_tasks(worker_id).await?;
        }

        Ok(task)
    }

    /// Rejects the task and stamps the targeted sections' last-task
    /// pointers with the rejection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the caller is an
    /// admin or the assigned worker, and domain or persistence errors
    /// otherwise.
    pub async fn reject_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_task(task_id).await?;
        if !task.permits_mutation(principal) {
            return Err(TaskLifecycleError::Forbidden {
                action: "reject this task",
                principal: principal.id,
            });
        }

        let prior_status = task.status();
        task.reject(&*self.clock)?;
        self.tasks.update_guarded(&task, prior_status).await?;

        self.sites
            .record_last_task(
                task.site_id(),
                task.section_ids(),
                LastTaskSummary::new(TaskStatus::Rejected, task.updated_at(), task.id()),
            )
            .await?;

        Ok(task)
    }

    /// Parks the task in review with the reviewer's verdict and comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin callers and
    /// domain or persistence errors otherwise.
    pub async fn review_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
        verdict: ReviewVerdict,
        comments: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        if !principal.is_admin() {
            return Err(TaskLifecycleError::Forbidden {
                action: "review tasks",
                principal: principal.id,
            });
        }

        let mut task = self.load_task(task_id).await?;
        let prior_status = task.status();
        let mut review = AdminReview::new(verdict, principal.id, &*self.clock);
        if let Some(text) = comments {
            review = review.with_comments(text);
        }
        task.move_to_review(review, &*self.clock)?;
        self.tasks.update_guarded(&task, prior_status).await?;
        Ok(task)
    }

    /// Stamps the caller's confirmation on the material line for an item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the caller is an
    /// admin or the assigned worker,
    /// [`TaskDomainError::UnknownMaterial`] when no line references the
    /// item, and persistence errors otherwise.
    pub async fn confirm_material(
        &self,
        principal: &Principal,
        task_id: TaskId,
        item_id: InventoryItemId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_task(task_id).await?;
        if !task.permits_mutation(principal) {
            return Err(TaskLifecycleError::Forbidden {
                action: "confirm materials",
                principal: principal.id,
            });
        }

        task.confirm_material(item_id, principal.id, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Fetches a task the caller may read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist and [`TaskLifecycleError::Forbidden`] when the caller is
    /// neither an admin, the assigned worker, nor the owning client.
    pub async fn get_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let task = self.load_task(task_id).await?;
        if !task.permits_read(principal) {
            return Err(TaskLifecycleError::Forbidden {
                action: "view this task",
                principal: principal.id,
            });
        }
        Ok(task)
    }

    /// Lists a worker's tasks, soonest scheduled first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the caller is an
    /// admin or the worker themself.
    pub async fn list_for_worker(
        &self,
        principal: &Principal,
        worker_id: AccountId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        if !principal.is_admin() && !principal.acts_for(worker_id) {
            return Err(TaskLifecycleError::Forbidden {
                action: "list another worker's tasks",
                principal: principal.id,
            });
        }
        Ok(self.tasks.list_for_worker(worker_id).await?)
    }

    /// Lists a site's tasks visible to the caller, soonest scheduled first.
    ///
    /// Admins see every task; workers and clients see only the tasks they
    /// could fetch individually.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list_for_site(
        &self,
        principal: &Principal,
        site_id: SiteId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let mut tasks = self.tasks.list_for_site(site_id).await?;
        tasks.retain(|task| task.permits_read(principal));
        Ok(tasks)
    }

    async fn load_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn restock_demands(&self, demands: &[StockDemand]) {
        for demand in demands {
            if let Err(err) = self.inventory.restock(demand.item_id, demand.amount).await {
                warn!(
                    item_id = %demand.item_id,
                    amount = demand.amount,
                    error = %err,
                    "restock after lost assignment race did not land"
                );
            }
        }
    }
}

fn material_demands(task: &Task) -> Vec<StockDemand> {
    task.materials()
        .iter()
        .map(|line| StockDemand::new(line.item_id(), line.quantity()))
        .collect()
}

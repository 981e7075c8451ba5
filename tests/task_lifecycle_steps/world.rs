//! Shared world state for work order lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use siteline::account::{
    adapters::memory::{InMemoryAccountRepository, InMemoryNotificationDispatcher},
    domain::{AccountId, Principal, Role},
};
use siteline::inventory::{
    adapters::memory::InMemoryInventoryRepository, domain::InventoryItemId,
};
use siteline::site::{
    adapters::memory::InMemorySiteRepository,
    domain::{SectionId, SiteId},
};
use siteline::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{FeedbackError, FeedbackService, TaskLifecycleError, TaskLifecycleService},
};

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemorySiteRepository<DefaultClock>,
    InMemoryAccountRepository<DefaultClock>,
    InMemoryInventoryRepository<DefaultClock>,
    InMemoryNotificationDispatcher,
    DefaultClock,
>;

/// Identifiers of the site seeded for a scenario.
#[derive(Clone, Copy)]
pub struct SeededSite {
    pub site_id: SiteId,
    pub section_id: SectionId,
    pub client_id: AccountId,
}

/// Scenario world for work order lifecycle behaviour tests.
pub struct TaskFlowWorld {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub sites: Arc<InMemorySiteRepository<DefaultClock>>,
    pub accounts: Arc<InMemoryAccountRepository<DefaultClock>>,
    pub inventory: Arc<InMemoryInventoryRepository<DefaultClock>>,
    pub lifecycle: TestLifecycleService,
    pub feedback: FeedbackService<InMemoryTaskRepository, DefaultClock>,
    pub admin: Principal,
    pub seeded_site: Option<SeededSite>,
    pub worker_id: Option<AccountId>,
    pub items: HashMap<String, InventoryItemId>,
    pub task: Option<Task>,
    pub last_assignment: Option<Result<Task, TaskLifecycleError>>,
    pub last_completion: Option<Result<Task, TaskLifecycleError>>,
    pub last_feedback: Option<Result<Task, FeedbackError>>,
}

impl TaskFlowWorld {
    /// Creates a world with empty repositories and no scenario state.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let sites = Arc::new(InMemorySiteRepository::new(DefaultClock));
        let accounts = Arc::new(InMemoryAccountRepository::new(DefaultClock));
        let inventory = Arc::new(InMemoryInventoryRepository::new(DefaultClock));
        let notifier = Arc::new(InMemoryNotificationDispatcher::new());
        let lifecycle = TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&sites),
            Arc::clone(&accounts),
            Arc::clone(&inventory),
            notifier,
            Arc::new(DefaultClock),
        );
        let feedback = FeedbackService::new(Arc::clone(&tasks), Arc::new(DefaultClock));

        Self {
            tasks,
            sites,
            accounts,
            inventory,
            lifecycle,
            feedback,
            admin: Principal::new(AccountId::new(), Role::Admin),
            seeded_site: None,
            worker_id: None,
            items: HashMap::new(),
            task: None,
            last_assignment: None,
            last_completion: None,
            last_feedback: None,
        }
    }

    /// Returns the seeded site, failing the scenario when missing.
    pub fn seeded_site(&self) -> Result<SeededSite, eyre::Report> {
        self.seeded_site
            .ok_or_else(|| eyre::eyre!("missing seeded site in scenario world"))
    }

    /// Returns the seeded worker, failing the scenario when missing.
    pub fn worker_id(&self) -> Result<AccountId, eyre::Report> {
        self.worker_id
            .ok_or_else(|| eyre::eyre!("missing seeded worker in scenario world"))
    }

    /// Returns the scenario task, failing the scenario when missing.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }

    /// Looks up a seeded inventory item by display name.
    pub fn item_id(&self, name: &str) -> Result<InventoryItemId, eyre::Report> {
        self.items
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no seeded inventory item named {name:?}"))
    }
}

impl Default for TaskFlowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskFlowWorld {
    TaskFlowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

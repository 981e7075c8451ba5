//! Shared test helpers for in-memory integration tests.

use mockable::{Clock, DefaultClock};
use rstest::fixture;
use siteline::account::{
    adapters::memory::{InMemoryAccountRepository, InMemoryNotificationDispatcher},
    domain::{Account, AccountId, Principal, Role},
    ports::AccountRepository,
};
use siteline::inventory::{
    adapters::memory::InMemoryInventoryRepository,
    domain::{BranchId, InventoryItem, InventoryItemId, StockLevel, Unit},
    ports::InventoryRepository,
};
use siteline::media::{
    adapters::memory::InMemoryMediaHost,
    domain::{MediaKind, StorageId, StoredMedia},
    services::{MediaAttachmentService, MediaCleanupService},
};
use siteline::site::{
    adapters::memory::InMemorySiteRepository,
    domain::{Section, SectionId, SiteId},
    ports::SiteRepository,
};
use siteline::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{MaterialLine, Task},
    services::{
        CreateTaskRequest, FeedbackService, RetentionConfig, RetentionService,
        TaskLifecycleService,
    },
};
use std::sync::Arc;

/// Lifecycle service wired against every in-memory adapter.
pub type Lifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemorySiteRepository<DefaultClock>,
    InMemoryAccountRepository<DefaultClock>,
    InMemoryInventoryRepository<DefaultClock>,
    InMemoryNotificationDispatcher,
    DefaultClock,
>;

/// Attachment service wired against the in-memory adapters.
pub type Attachments =
    MediaAttachmentService<InMemoryTaskRepository, InMemoryMediaHost, DefaultClock>;

/// Cleanup service wired against the in-memory adapters.
pub type Cleanup = MediaCleanupService<
    InMemoryTaskRepository,
    InMemorySiteRepository<DefaultClock>,
    InMemoryMediaHost,
    DefaultClock,
>;

/// Shared in-memory environment backing every service under test.
pub struct Env {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub sites: Arc<InMemorySiteRepository<DefaultClock>>,
    pub accounts: Arc<InMemoryAccountRepository<DefaultClock>>,
    pub inventory: Arc<InMemoryInventoryRepository<DefaultClock>>,
    pub notifier: Arc<InMemoryNotificationDispatcher>,
    pub host: Arc<InMemoryMediaHost>,
}

impl Env {
    /// Creates a fresh environment with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            sites: Arc::new(InMemorySiteRepository::new(DefaultClock)),
            accounts: Arc::new(InMemoryAccountRepository::new(DefaultClock)),
            inventory: Arc::new(InMemoryInventoryRepository::new(DefaultClock)),
            notifier: Arc::new(InMemoryNotificationDispatcher::new()),
            host: Arc::new(InMemoryMediaHost::new()),
        }
    }

    /// Builds a lifecycle service over this environment.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        TaskLifecycleService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.sites),
            Arc::clone(&self.accounts),
            Arc::clone(&self.inventory),
            Arc::clone(&self.notifier),
            Arc::new(DefaultClock),
        )
    }

    /// Builds a feedback service over this environment.
    #[must_use]
    pub fn feedback(&self) -> FeedbackService<InMemoryTaskRepository, DefaultClock> {
        FeedbackService::new(Arc::clone(&self.tasks), Arc::new(DefaultClock))
    }

    /// Builds an attachment service over this environment.
    #[must_use]
    pub fn attachments(&self) -> Attachments {
        MediaAttachmentService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.host),
            Arc::new(DefaultClock),
        )
    }

    /// Builds a cleanup service over this environment.
    #[must_use]
    pub fn cleanup(&self) -> Cleanup {
        MediaCleanupService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.sites),
            Arc::clone(&self.host),
            Arc::new(DefaultClock),
        )
    }

    /// Builds a retention service over this environment.
    #[must_use]
    pub fn retention(
        &self,
        config: RetentionConfig,
    ) -> RetentionService<InMemoryTaskRepository, InMemoryMediaHost, DefaultClock> {
        RetentionService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.host),
            config,
            Arc::new(DefaultClock),
        )
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fresh environment for each test.
#[fixture]
pub fn env() -> Env {
    Env::new()
}

/// Provides an admin principal.
#[must_use]
pub fn admin() -> Principal {
    Principal::new(AccountId::new(), Role::Admin)
}

/// Builds a hosted media descriptor with a tagged URL and storage id.
///
/// # Panics
///
/// Panics when the tag produces an invalid descriptor.
#[must_use]
pub fn stored_media(tag: &str) -> StoredMedia {
    StoredMedia::new(
        format!("https://media.example/{tag}"),
        storage_id(tag),
        MediaKind::Image,
    )
    .expect("valid media descriptor")
}

/// Builds the storage identifier `stored_media` assigns for a tag.
///
/// # Panics
///
/// Panics when the tag is empty.
#[must_use]
pub fn storage_id(tag: &str) -> StorageId {
    StorageId::new(format!("obj-{tag}")).expect("valid storage id")
}

/// Seeds a stored account and returns it.
///
/// # Panics
///
/// Panics when the account cannot be created or stored.
pub async fn seed_account(env: &Env, name: &str, role: Role) -> Account {
    let account = Account::new(name, role, &DefaultClock).expect("valid account");
    env.accounts
        .store(&account)
        .await
        .expect("account should store");
    account
}

/// A seeded site with one section carrying reference media.
pub struct SeededSite {
    pub site_id: SiteId,
    pub section_id: SectionId,
    pub client_id: AccountId,
}

/// Seeds a client, a site, and one section with a reference photo.
///
/// # Panics
///
/// Panics when any seeding step fails.
pub async fn seed_client_site(env: &Env) -> SeededSite {
    let client = seed_account(env, "Mercer Holdings", Role::Client).await;
    let mut site = siteline::site::domain::Site::new(
        client.id(),
        "Riverside Mall",
        "12 Quay Street",
        "retail",
        &DefaultClock,
    )
    .expect("valid site");
    let section_id =
        site.add_section(Section::new("Atrium").expect("valid section"), &DefaultClock);
    site.add_section_reference_media(section_id, stored_media("atrium-plan"), &DefaultClock)
        .expect("section should exist");
    env.sites.store(&site).await.expect("site should store");
    SeededSite {
        site_id: site.id(),
        section_id,
        client_id: client.id(),
    }
}

/// Seeds an inventory item with the given stock on a fresh branch.
///
/// # Panics
///
/// Panics when the item cannot be created or stored.
pub async fn seed_item(env: &Env, name: &str, quantity: f64) -> InventoryItemId {
    let item = InventoryItem::new(
        BranchId::new(),
        name,
        Unit::Kg,
        StockLevel::new(quantity, 0.0).expect("non-negative stock"),
        &DefaultClock,
    )
    .expect("valid item");
    env.inventory.store(&item).await.expect("item should store");
    item.id()
}

/// Creates a pending task on the seeded site through the lifecycle service.
///
/// # Panics
///
/// Panics when creation fails.
pub async fn create_pending_task(
    env: &Env,
    seeded: &SeededSite,
    materials: Vec<MaterialLine>,
) -> Task {
    env.lifecycle()
        .create_task(
            &admin(),
            CreateTaskRequest::new(
                seeded.site_id,
                vec![seeded.section_id],
                DefaultClock.utc(),
            )
            .with_materials(materials),
        )
        .await
        .expect("task creation should succeed")
}

//! In-memory integration tests for the work order lifecycle.

use super::helpers::{
    admin, create_pending_task, env, seed_account, seed_client_site, seed_item, Env,
};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use siteline::account::{
    domain::{Principal, Role},
    ports::AccountRepository,
};
use siteline::inventory::{
    domain::Unit,
    ports::{InventoryRepository, InventoryRepositoryError},
};
use siteline::site::ports::SiteRepository;
use siteline::task::{
    domain::{MaterialLine, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleError},
};

// ── Creation and derived values ─────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
async fn created_task_carries_a_derived_cost_total(env: Env) {
    let seeded = seed_client_site(&env).await;

    let task = env
        .lifecycle()
        .create_task(
            &admin(),
            CreateTaskRequest::new(seeded.site_id, vec![seeded.section_id], DefaultClock.utc())
                .with_labor_cost(120.0)
                .with_materials_cost(35.5),
        )
        .await
        .expect("task creation should succeed");

    assert!((task.cost().total() - 155.5).abs() < f64::EPSILON);
    assert_eq!(task.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reference_snapshot_is_independent_of_the_section(env: Env) {
    let seeded = seed_client_site(&env).await;
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    assert_eq!(task.reference_media().len(), 1);

    let mut site = env
        .sites
        .find_by_id(seeded.site_id)
        .await
        .expect("lookup should succeed")
        .expect("site should exist");
    let removed = site
        .remove_section_reference_media(
            seeded.section_id,
            &super::helpers::storage_id("atrium-plan"),
            &DefaultClock,
        )
        .expect("section should exist");
    assert!(removed);
    env.sites.update(&site).await.expect("update should succeed");

    let stored = env
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.reference_media().len(), 1, "the copy must survive");
}

// ── Assignment and stock ────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
async fn assignment_is_all_or_nothing_on_stock(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let grout = seed_item(&env, "Grout", 10.0).await;
    let sealant = seed_item(&env, "Sealant", 1.0).await;
    let task = create_pending_task(
        &env,
        &seeded,
        vec![
            MaterialLine::new(grout, 4.0, Unit::Kg).expect("positive quantity"),
            MaterialLine::new(sealant, 3.0, Unit::Kg).expect("positive quantity"),
        ],
    )
    .await;

    let result = env
        .lifecycle()
        .assign_worker(&admin(), task.id(), worker.id())
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Inventory(
            InventoryRepositoryError::InsufficientStock { .. }
        ))
    ));

    // The grout line alone would have fit; nothing may be deducted.
    let grout_item = env
        .inventory
        .find_by_id(grout)
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert!((grout_item.stock().current() - 10.0).abs() < f64::EPSILON);

    let stored = env
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
async fn successful_assignment_spends_the_planned_stock(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let grout = seed_item(&env, "Grout", 10.0).await;
    let task = create_pending_task(
        &env,
        &seeded,
        vec![MaterialLine::new(grout, 4.0, Unit::Kg).expect("positive quantity")],
    )
    .await;

    let assigned = env
        .lifecycle()
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");

    assert_eq!(assigned.status(), TaskStatus::Assigned);
    let item = env
        .inventory
        .find_by_id(grout)
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert!((item.stock().current() - 6.0).abs() < f64::EPSILON);
}

// ── Completion cascade and concurrency ──────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_cascades_into_site_and_account_counters(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    let service = env.lifecycle();

    service
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    service
        .start_task(&worker_principal, task.id(), None)
        .await
        .expect("start should succeed");
    let completed = service
        .complete_task(&worker_principal, task.id(), None)
        .await
        .expect("completion should succeed");

    assert_eq!(completed.status(), TaskStatus::Completed);
    assert!(completed.completed_at().is_some());

    let site = env
        .sites
        .find_by_id(seeded.site_id)
        .await
        .expect("lookup should succeed")
        .expect("site should exist");
    assert_eq!(site.total_tasks(), 1);
    assert_eq!(site.completed_tasks(), 1);
    assert_eq!(site.last_visit(), completed.completed_at());

    let client = env
        .accounts
        .find_by_id(seeded.client_id)
        .await
        .expect("lookup should succeed")
        .expect("client should exist");
    assert_eq!(client.completed_tasks(), 1);

    let worker_account = env
        .accounts
        .find_by_id(worker.id())
        .await
        .expect("lookup should succeed")
        .expect("worker should exist");
    assert_eq!(worker_account.completed_tasks(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_completions_bump_counters_exactly_once(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    let service = env.lifecycle();

    service
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    service
        .start_task(&worker_principal, task.id(), None)
        .await
        .expect("start should succeed");

    // Both writers hold an in-progress copy; the slower guarded write
    // must conflict instead of double-applying.
    let mut first = env
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    let mut second = first.clone();
    first.complete(None, &DefaultClock).expect("completable");
    second.complete(None, &DefaultClock).expect("completable");

    env.tasks
        .update_guarded(&first, TaskStatus::InProgress)
        .await
        .expect("first write should win");
    let conflict = env
        .tasks
        .update_guarded(&second, TaskStatus::InProgress)
        .await;
    assert!(matches!(
        conflict,
        Err(TaskRepositoryError::StatusConflict { .. })
    ));

    // With the stored task already completed, a service-level retry is a
    // domain error, and the cascade from the winning path runs once.
    service
        .complete_task(&worker_principal, task.id(), None)
        .await
        .expect_err("second completion must fail");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn notifications_are_fire_and_forget(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    env.notifier.set_failing(true);

    let assigned = env
        .lifecycle()
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should survive a dead notifier");

    assert_eq!(assigned.status(), TaskStatus::Assigned);
    assert!(env.notifier.sent().is_empty());
}

// ── Read scoping ────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workers_see_only_their_own_tasks(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let other = seed_account(&env, "Jules Barta", Role::Worker).await;
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    let service = env.lifecycle();

    service
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");

    let own = service
        .list_for_worker(&Principal::new(worker.id(), Role::Worker), worker.id())
        .await
        .expect("listing should succeed");
    assert_eq!(own.len(), 1);

    let foreign = service
        .list_for_worker(&Principal::new(other.id(), Role::Worker), worker.id())
        .await;
    assert!(matches!(foreign, Err(TaskLifecycleError::Forbidden { .. })));
}

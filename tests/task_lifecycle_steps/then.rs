//! Then steps for work order lifecycle BDD scenarios.

use super::world::{run_async, TaskFlowWorld};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use siteline::inventory::ports::{InventoryRepository, InventoryRepositoryError};
use siteline::site::ports::SiteRepository;
use siteline::task::{
    domain::{TaskDomainError, TaskStatus},
    ports::TaskRepository,
    services::{FeedbackError, TaskLifecycleError},
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskFlowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task_id = world.task()?.id();
    let stored = run_async(world.tasks.find_by_id(task_id))
        .wrap_err("reload task")?
        .ok_or_else(|| eyre::eyre!("task missing from repository"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }

    Ok(())
}

#[then("the worker is recorded on the task")]
fn worker_is_recorded(world: &TaskFlowWorld) -> Result<(), eyre::Report> {
    let worker_id = world.worker_id()?;
    let task_id = world.task()?.id();
    let stored = run_async(world.tasks.find_by_id(task_id))
        .wrap_err("reload task")?
        .ok_or_else(|| eyre::eyre!("task missing from repository"))?;

    if stored.worker_id() != Some(worker_id) {
        return Err(eyre::eyre!(
            "expected worker {worker_id} on the task, found {:?}",
            stored.worker_id()
        ));
    }

    Ok(())
}

#[then(r#"the remaining stock of "{name}" is {quantity:f64} kg"#)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
fn remaining_stock_is(
    world: &TaskFlowWorld,
    name: String,
    quantity: f64,
) -> Result<(), eyre::Report> {
    let item_id = world.item_id(&name)?;
    let item = run_async(world.inventory.find_by_id(item_id))
        .wrap_err("reload inventory item")?
        .ok_or_else(|| eyre::eyre!("inventory item missing from repository"))?;

    let current = item.stock().current();
    if (current - quantity).abs() >= f64::EPSILON {
        return Err(eyre::eyre!("expected {quantity} on hand, found {current}"));
    }

    Ok(())
}

#[then("the assignment fails with an insufficient stock error")]
fn assignment_fails_with_insufficient_stock(world: &TaskFlowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_assignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assignment result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Inventory(
            InventoryRepositoryError::InsufficientStock { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InsufficientStock error, got {result:?}"
        ));
    }

    Ok(())
}

#[then("the site completed-task counter is {count:u32}")]
fn completed_task_counter_is(world: &TaskFlowWorld, count: u32) -> Result<(), eyre::Report> {
    let seeded = world.seeded_site()?;
    let site = run_async(world.sites.find_by_id(seeded.site_id))
        .wrap_err("reload site")?
        .ok_or_else(|| eyre::eyre!("site missing from repository"))?;

    if site.completed_tasks() != count {
        return Err(eyre::eyre!(
            "expected {count} completed tasks on the site, found {}",
            site.completed_tasks()
        ));
    }

    Ok(())
}

#[then("the completion fails with an invalid transition error")]
fn completion_fails_with_invalid_transition(world: &TaskFlowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }

    Ok(())
}

#[then("the feedback is rejected because the work is unfinished")]
fn feedback_rejected_as_unfinished(world: &TaskFlowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_feedback
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing feedback result"))?;

    if !matches!(
        result,
        Err(FeedbackError::Domain(
            TaskDomainError::FeedbackRequiresCompletion { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected FeedbackRequiresCompletion error, got {result:?}"
        ));
    }

    Ok(())
}

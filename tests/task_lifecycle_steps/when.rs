//! When steps for work order lifecycle BDD scenarios.

use super::world::{run_async, TaskFlowWorld};
use rstest_bdd_macros::when;
use siteline::account::domain::{Principal, Role};
use siteline::task::services::SubmitFeedbackRequest;

#[when("the task is assigned to the worker")]
fn assign_task(world: &mut TaskFlowWorld) -> Result<(), eyre::Report> {
    let worker_id = world.worker_id()?;
    let task_id = world.task()?.id();

    let outcome = run_async(world.lifecycle.assign_worker(&world.admin, task_id, worker_id));
    if let Ok(task) = &outcome {
        world.task = Some(task.clone());
    }
    world.last_assignment = Some(outcome);
    Ok(())
}

#[when("the task is completed")]
fn complete_task(world: &mut TaskFlowWorld) -> Result<(), eyre::Report> {
    let worker_id = world.worker_id()?;
    let task_id = world.task()?.id();

    let outcome = run_async(world.lifecycle.complete_task(
        &Principal::new(worker_id, Role::Worker),
        task_id,
        None,
    ));
    if let Ok(task) = &outcome {
        world.task = Some(task.clone());
    }
    world.last_completion = Some(outcome);
    Ok(())
}

#[when("the client rates the task with {rating:u8} stars")]
fn rate_task(world: &mut TaskFlowWorld, rating: u8) -> Result<(), eyre::Report> {
    let seeded = world.seeded_site()?;
    let task_id = world.task()?.id();

    let outcome = run_async(world.feedback.submit(
        &Principal::new(seeded.client_id, Role::Client),
        SubmitFeedbackRequest::new(task_id, rating),
    ));
    world.last_feedback = Some(outcome);
    Ok(())
}

//! In-memory integration tests for client feedback.

use super::helpers::{admin, create_pending_task, env, seed_account, seed_client_site, Env};
use rstest::rstest;
use siteline::account::domain::{Principal, Role};
use siteline::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{FeedbackError, SubmitFeedbackRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feedback_opens_only_after_completion(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let client = Principal::new(seeded.client_id, Role::Client);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    let lifecycle = env.lifecycle();
    let feedback = env.feedback();

    let early = feedback
        .submit(&client, SubmitFeedbackRequest::new(task.id(), 5))
        .await;
    assert!(matches!(
        early,
        Err(FeedbackError::Domain(
            TaskDomainError::FeedbackRequiresCompletion {
                status: TaskStatus::Pending
            }
        ))
    ));

    lifecycle
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    lifecycle
        .start_task(&worker_principal, task.id(), None)
        .await
        .expect("start should succeed");
    lifecycle
        .complete_task(&worker_principal, task.id(), None)
        .await
        .expect("completion should succeed");

    let rated = feedback
        .submit(
            &client,
            SubmitFeedbackRequest::new(task.id(), 4).with_comment("quick and clean"),
        )
        .await
        .expect("feedback should record");
    assert_eq!(rated.feedback().map(|f| f.rating().value()), Some(4));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resubmission_replaces_and_workers_stay_locked_out(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let client = Principal::new(seeded.client_id, Role::Client);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    let lifecycle = env.lifecycle();
    let feedback = env.feedback();

    lifecycle
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    lifecycle
        .start_task(&worker_principal, task.id(), None)
        .await
        .expect("start should succeed");
    lifecycle
        .complete_task(&worker_principal, task.id(), None)
        .await
        .expect("completion should succeed");

    let from_worker = feedback
        .submit(&worker_principal, SubmitFeedbackRequest::new(task.id(), 5))
        .await;
    assert!(matches!(from_worker, Err(FeedbackError::Forbidden { .. })));

    feedback
        .submit(
            &client,
            SubmitFeedbackRequest::new(task.id(), 2).with_comment("edges look rough"),
        )
        .await
        .expect("first feedback should record");
    let replaced = feedback
        .submit_satisfied(&client, task.id())
        .await
        .expect("replacement should record");

    let record = replaced.feedback().expect("feedback should exist");
    assert_eq!(record.rating().value(), 5);
    assert_eq!(record.comment(), None);
    assert!(record.is_satisfied_only());
}

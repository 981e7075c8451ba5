//! In-memory integration tests for gallery attachments and media cleanup.

use super::helpers::{
    admin, create_pending_task, env, seed_account, seed_client_site, storage_id, stored_media, Env,
};
use rstest::rstest;
use siteline::account::domain::{Principal, Role};
use siteline::media::services::{MediaCleanupError, MediaOwner};
use siteline::site::ports::SiteRepository;
use siteline::task::{
    domain::{AttachmentId, MediaSlot},
    ports::TaskRepository,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_documents_before_and_after_states(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    env.lifecycle()
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    let attachments = env.attachments();

    attachments
        .add_media(
            &worker_principal,
            task.id(),
            MediaSlot::Before,
            vec![stored_media("cracked-tile")],
            false,
        )
        .await
        .expect("before shot should attach");
    let updated = attachments
        .add_media(
            &worker_principal,
            task.id(),
            MediaSlot::After,
            vec![stored_media("new-tile"), stored_media("sealed-edge")],
            true,
        )
        .await
        .expect("after shots should attach");

    assert_eq!(updated.gallery().slot(MediaSlot::Before).len(), 1);
    assert_eq!(updated.gallery().slot(MediaSlot::After).len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_visibility_reports_how_many_attachments_matched(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    env.lifecycle()
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    let attachments = env.attachments();

    let updated = attachments
        .add_media(
            &worker_principal,
            task.id(),
            MediaSlot::After,
            vec![stored_media("one"), stored_media("two")],
            true,
        )
        .await
        .expect("attachments should land");
    let known: Vec<AttachmentId> = updated
        .gallery()
        .slot(MediaSlot::After)
        .iter()
        .map(siteline::task::domain::Attachment::id)
        .collect();

    let matched = attachments
        .set_visibility(
            &worker_principal,
            task.id(),
            MediaSlot::After,
            &[*known.first().expect("first id"), AttachmentId::new()],
            false,
        )
        .await
        .expect("batch should apply");

    assert_eq!(matched, 1, "unknown identifiers are skipped, not counted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cleanup_refuses_identifiers_the_owner_does_not_hold(env: Env) {
    let seeded = seed_client_site(&env).await;
    let cleanup = env.cleanup();

    let result = cleanup
        .delete_stored_object(
            &admin(),
            MediaOwner::SectionReference {
                site_id: seeded.site_id,
                section_id: seeded.section_id,
            },
            &storage_id("not-ours"),
        )
        .await;

    assert!(matches!(
        result,
        Err(MediaCleanupError::ObjectNotFound { .. })
    ));
    assert!(env.host.deleted().is_empty(), "nothing reaches the host");

    let site = env
        .sites
        .find_by_id(seeded.site_id)
        .await
        .expect("lookup should succeed")
        .expect("site should exist");
    let section = site.section(seeded.section_id).expect("section should exist");
    assert_eq!(section.reference_media().len(), 1, "the record is intact");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cleanup_removes_a_referenced_gallery_object(env: Env) {
    let seeded = seed_client_site(&env).await;
    let worker = seed_account(&env, "Dana Ortiz", Role::Worker).await;
    let worker_principal = Principal::new(worker.id(), Role::Worker);
    let task = create_pending_task(&env, &seeded, Vec::new()).await;
    env.lifecycle()
        .assign_worker(&admin(), task.id(), worker.id())
        .await
        .expect("assignment should succeed");
    env.attachments()
        .add_media(
            &worker_principal,
            task.id(),
            MediaSlot::After,
            vec![stored_media("to-drop")],
            true,
        )
        .await
        .expect("attachment should land");

    env.cleanup()
        .delete_stored_object(
            &worker_principal,
            MediaOwner::TaskGallery {
                task_id: task.id(),
                slot: MediaSlot::After,
            },
            &storage_id("to-drop"),
        )
        .await
        .expect("cleanup should succeed");

    assert_eq!(env.host.deleted(), vec![storage_id("to-drop")]);
    let stored = env
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert!(stored.gallery().slot(MediaSlot::After).is_empty());
}

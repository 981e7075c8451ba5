//! In-memory integration tests for retention sweeps.

use super::helpers::{env, storage_id, stored_media, Env};
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use siteline::account::domain::AccountId;
use siteline::site::domain::{SectionId, SiteId};
use siteline::task::{
    domain::{
        Attachment, Cost, MediaGallery, MediaSlot, PersistedTaskData, SectionMediaSnapshot, Task,
        TaskId, TaskStatus,
    },
    ports::TaskRepository,
    services::RetentionConfig,
};

fn finished_task(age_days: i64, media_tag: &str) -> Task {
    let stamp = DefaultClock.utc() - Duration::days(age_days);
    let mut gallery = MediaGallery::new();
    gallery.append(
        MediaSlot::After,
        Attachment::new(stored_media(media_tag), AccountId::new(), true, &DefaultClock),
    );

    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        site_id: SiteId::new(),
        section_ids: vec![SectionId::new()],
        client_id: AccountId::new(),
        worker_id: Some(AccountId::new()),
        branch_id: None,
        status: TaskStatus::Completed,
        scheduled_date: stamp,
        estimated_duration_hours: None,
        started_at: Some(stamp - Duration::hours(3)),
        completed_at: Some(stamp),
        start_fix: None,
        end_fix: None,
        gallery,
        reference_media: vec![SectionMediaSnapshot::new(
            SectionId::new(),
            stored_media("survey"),
        )],
        materials: Vec::new(),
        cost: Cost::zero(),
        review: None,
        feedback: None,
        created_at: stamp,
        updated_at: stamp,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn media_sweep_strips_galleries_but_spares_section_snapshots(env: Env) {
    let aged = finished_task(120, "old-after");
    let fresh = finished_task(5, "new-after");
    env.tasks.store(&aged).await.expect("store should succeed");
    env.tasks.store(&fresh).await.expect("store should succeed");

    let released = env
        .retention(RetentionConfig::default())
        .purge_aged_media()
        .await
        .expect("sweep should succeed");

    assert_eq!(released, 1);
    assert_eq!(env.host.deleted(), vec![storage_id("old-after")]);

    let scrubbed = env
        .tasks
        .find_by_id(aged.id())
        .await
        .expect("lookup should succeed")
        .expect("task should remain");
    assert!(scrubbed.gallery().is_empty());
    assert_eq!(scrubbed.reference_media().len(), 1);

    let untouched = env
        .tasks
        .find_by_id(fresh.id())
        .await
        .expect("lookup should succeed")
        .expect("task should remain");
    assert_eq!(untouched.gallery().slot(MediaSlot::After).len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_sweep_deletes_expired_records_outright(env: Env) {
    let expired = finished_task(400, "expired");
    let retained = finished_task(120, "retained");
    env.tasks
        .store(&expired)
        .await
        .expect("store should succeed");
    env.tasks
        .store(&retained)
        .await
        .expect("store should succeed");

    let removed = env
        .retention(RetentionConfig::default())
        .purge_aged_tasks()
        .await
        .expect("sweep should succeed");

    assert_eq!(removed, 1);
    assert!(
        env.tasks
            .find_by_id(expired.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        env.tasks
            .find_by_id(retained.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
    assert!(env.host.deleted().contains(&storage_id("expired")));
}

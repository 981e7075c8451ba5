//! In-memory integration tests for the site registry.

use super::helpers::{env, storage_id, stored_media, Env};
use mockable::DefaultClock;
use rstest::rstest;
use siteline::account::domain::AccountId;
use siteline::site::{
    domain::{SectionStatus, SiteDomainError},
    services::{AddSectionRequest, CreateSiteRequest, SiteRegistryError, SiteRegistryService},
};
use std::sync::Arc;

fn registry(env: &Env) -> SiteRegistryService<
    siteline::site::adapters::memory::InMemorySiteRepository<DefaultClock>,
    DefaultClock,
> {
    SiteRegistryService::new(Arc::clone(&env.sites), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_site_with_cover_and_sections(env: Env) {
    let service = registry(&env);
    let client_id = AccountId::new();

    let site = service
        .create_site(
            CreateSiteRequest::new(client_id, "Harbour Offices", "3 Pier Road", "office")
                .with_cover_image(stored_media("front")),
        )
        .await
        .expect("site creation should succeed");
    assert_eq!(site.client_id(), client_id);
    assert!(site.cover_image().is_some());
    assert_eq!(site.total_tasks(), 0);

    let section_id = service
        .add_section(
            site.id(),
            AddSectionRequest::new("Lobby")
                .with_description("Double-height entrance")
                .with_area_sqm(140.0),
        )
        .await
        .expect("section should be added");

    let stored = service
        .get_site(site.id())
        .await
        .expect("lookup should succeed");
    let section = stored.section(section_id).expect("section should exist");
    assert_eq!(section.name(), "Lobby");
    assert_eq!(section.description(), Some("Double-height entrance"));
    assert_eq!(section.status(), SectionStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_site_fields_are_rejected(env: Env) {
    let service = registry(&env);

    let result = service
        .create_site(CreateSiteRequest::new(
            AccountId::new(),
            "   ",
            "3 Pier Road",
            "office",
        ))
        .await;

    assert!(matches!(
        result,
        Err(SiteRegistryError::Domain(SiteDomainError::EmptyName))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn section_status_updates_require_a_known_section(env: Env) {
    let service = registry(&env);
    let site = service
        .create_site(CreateSiteRequest::new(
            AccountId::new(),
            "Harbour Offices",
            "3 Pier Road",
            "office",
        ))
        .await
        .expect("site creation should succeed");
    let section_id = service
        .add_section(site.id(), AddSectionRequest::new("Lobby"))
        .await
        .expect("section should be added");

    service
        .update_section_status(site.id(), section_id, SectionStatus::Maintenance)
        .await
        .expect("status update should succeed");
    let stored = service
        .get_site(site.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(
        stored.section(section_id).map(|section| section.status()),
        Some(SectionStatus::Maintenance)
    );

    let unknown = service
        .update_section_status(
            site.id(),
            siteline::site::domain::SectionId::new(),
            SectionStatus::Completed,
        )
        .await;
    assert!(matches!(
        unknown,
        Err(SiteRegistryError::Domain(
            SiteDomainError::UnknownSection { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reference_media_accumulates_on_the_section(env: Env) {
    let service = registry(&env);
    let site = service
        .create_site(CreateSiteRequest::new(
            AccountId::new(),
            "Harbour Offices",
            "3 Pier Road",
            "office",
        ))
        .await
        .expect("site creation should succeed");
    let section_id = service
        .add_section(site.id(), AddSectionRequest::new("Lobby"))
        .await
        .expect("section should be added");

    service
        .add_section_reference_media(site.id(), section_id, stored_media("lobby-1"))
        .await
        .expect("media should attach");
    service
        .add_section_reference_media(site.id(), section_id, stored_media("lobby-2"))
        .await
        .expect("media should attach");

    let stored = service
        .get_site(site.id())
        .await
        .expect("lookup should succeed");
    let section = stored.section(section_id).expect("section should exist");
    assert_eq!(section.reference_media().len(), 2);
    assert!(
        section
            .reference_media()
            .iter()
            .any(|media| *media.storage_id() == storage_id("lobby-2"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_only_the_clients_sites(env: Env) {
    let service = registry(&env);
    let client_id = AccountId::new();

    service
        .create_site(CreateSiteRequest::new(
            client_id,
            "Harbour Offices",
            "3 Pier Road",
            "office",
        ))
        .await
        .expect("site creation should succeed");
    service
        .create_site(CreateSiteRequest::new(
            client_id,
            "Riverside Mall",
            "12 Quay Street",
            "retail",
        ))
        .await
        .expect("site creation should succeed");
    service
        .create_site(CreateSiteRequest::new(
            AccountId::new(),
            "Somebody Else's Depot",
            "9 Yard Lane",
            "warehouse",
        ))
        .await
        .expect("site creation should succeed");

    let sites = service
        .list_for_client(client_id)
        .await
        .expect("listing should succeed");
    assert_eq!(sites.len(), 2);
    assert!(sites.iter().all(|site| site.client_id() == client_id));
}

//! In-memory integration tests for the stock ledger.

use super::helpers::{env, Env};
use mockable::DefaultClock;
use rstest::rstest;
use siteline::inventory::{
    domain::{BranchId, StockStatus, Unit},
    ports::{InventoryRepository, InventoryRepositoryError, StockDemand},
    services::{InventoryLedgerError, InventoryLedgerService, RegisterItemRequest},
};
use std::sync::Arc;

fn ledger(env: &Env) -> InventoryLedgerService<
    siteline::inventory::adapters::memory::InMemoryInventoryRepository<DefaultClock>,
    DefaultClock,
> {
    InventoryLedgerService::new(Arc::clone(&env.inventory), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
async fn register_deduct_and_restock_round_trip(env: Env) {
    let service = ledger(&env);
    let branch_id = BranchId::new();

    let item = service
        .register_item(
            RegisterItemRequest::new(branch_id, "Grout", Unit::Kg)
                .with_initial_quantity(10.0)
                .with_minimum_quantity(2.0),
        )
        .await
        .expect("registration should succeed");

    let after_deduct = service
        .deduct(item.id(), 3.5)
        .await
        .expect("deduction should succeed");
    assert!((after_deduct.stock().current() - 6.5).abs() < f64::EPSILON);

    let after_restock = service
        .restock(item.id(), 1.5)
        .await
        .expect("restock should succeed");
    assert!((after_restock.stock().current() - 8.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
async fn overdraft_is_rejected_without_touching_stock(env: Env) {
    let service = ledger(&env);
    let item = service
        .register_item(
            RegisterItemRequest::new(BranchId::new(), "Sealant", Unit::Liter)
                .with_initial_quantity(2.0),
        )
        .await
        .expect("registration should succeed");

    let result = service.deduct(item.id(), 5.0).await;

    match result {
        Err(InventoryLedgerError::Repository(InventoryRepositoryError::InsufficientStock {
            item_id,
            requested,
            available,
        })) => {
            assert_eq!(item_id, item.id());
            assert!((requested - 5.0).abs() < f64::EPSILON);
            assert!((available - 2.0).abs() < f64::EPSILON);
        }
        other => panic!("expected insufficient stock, got {other:?}"),
    }

    let status = service
        .stock_status(item.id())
        .await
        .expect("status should resolve");
    assert_eq!(status, StockStatus::InStock);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional quantities within float tolerance"
)]
async fn batched_deduction_repeats_items_cumulatively(env: Env) {
    let service = ledger(&env);
    let item = service
        .register_item(
            RegisterItemRequest::new(BranchId::new(), "Grout", Unit::Kg)
                .with_initial_quantity(10.0),
        )
        .await
        .expect("registration should succeed");

    // Two demands for the same item must be judged against the running
    // balance, not each against the opening stock.
    let result = env
        .inventory
        .deduct_all(&[
            StockDemand::new(item.id(), 6.0),
            StockDemand::new(item.id(), 6.0),
        ])
        .await;
    assert!(matches!(
        result,
        Err(InventoryRepositoryError::InsufficientStock { .. })
    ));

    let untouched = env
        .inventory
        .find_by_id(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert!((untouched.stock().current() - 10.0).abs() < f64::EPSILON);

    env.inventory
        .deduct_all(&[
            StockDemand::new(item.id(), 6.0),
            StockDemand::new(item.id(), 4.0),
        ])
        .await
        .expect("a fitting batch should commit");
    let drained = env
        .inventory
        .find_by_id(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert!(drained.stock().current().abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn low_stock_listing_flags_threshold_and_empty_items(env: Env) {
    let service = ledger(&env);
    let branch_id = BranchId::new();

    service
        .register_item(
            RegisterItemRequest::new(branch_id, "Grout", Unit::Kg)
                .with_initial_quantity(10.0)
                .with_minimum_quantity(2.0),
        )
        .await
        .expect("registration should succeed");
    let low = service
        .register_item(
            RegisterItemRequest::new(branch_id, "Sealant", Unit::Liter)
                .with_initial_quantity(2.0)
                .with_minimum_quantity(2.0),
        )
        .await
        .expect("registration should succeed");
    let empty = service
        .register_item(RegisterItemRequest::new(branch_id, "Mesh tape", Unit::Piece))
        .await
        .expect("registration should succeed");

    let flagged = service
        .list_low_stock(branch_id)
        .await
        .expect("listing should succeed");

    let ids: Vec<_> = flagged.iter().map(|item| item.id()).collect();
    assert_eq!(flagged.len(), 2);
    assert!(ids.contains(&low.id()));
    assert!(ids.contains(&empty.id()));
    assert_eq!(
        service
            .stock_status(empty.id())
            .await
            .expect("status should resolve"),
        StockStatus::OutOfStock
    );
}

//! Repository port for inventory persistence and atomic stock arithmetic.

use crate::inventory::domain::{BranchId, InventoryItem, InventoryItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for inventory repository operations.
pub type InventoryRepositoryResult<T> = Result<T, InventoryRepositoryError>;

/// One requested deduction within a multi-item demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockDemand {
    /// Item to deduct from.
    pub item_id: InventoryItemId,
    /// Quantity to deduct.
    pub amount: f64,
}

impl StockDemand {
    /// Creates a stock demand.
    #[must_use]
    pub const fn new(item_id: InventoryItemId, amount: f64) -> Self {
        Self { item_id, amount }
    }
}

/// Inventory persistence contract.
///
/// Stock arithmetic happens store-side as conditional updates, never as
/// read-modify-write in the caller, so concurrent deductions against the
/// same item cannot lose updates or drive stock negative.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Stores a new inventory item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryRepositoryError::DuplicateItem`] when the item
    /// identifier already exists.
    async fn store(&self, item: &InventoryItem) -> InventoryRepositoryResult<()>;

    /// Finds an item by identifier.
    ///
    /// Returns `None` when the item does not exist.
    async fn find_by_id(
        &self,
        id: InventoryItemId,
    ) -> InventoryRepositoryResult<Option<InventoryItem>>;

    /// Lists every item belonging to a branch.
    async fn list_for_branch(
        &self,
        branch_id: BranchId,
    ) -> InventoryRepositoryResult<Vec<InventoryItem>>;

    /// Atomically deducts `amount` from an item, only when enough stock is
    /// on hand, and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryRepositoryError::InsufficientStock`] when the
    /// deduction would drive stock negative, leaving the item unchanged;
    /// [`InventoryRepositoryError::InactiveItem`] for retired items;
    /// [`InventoryRepositoryError::InvalidAmount`] for non-positive amounts.
    async fn deduct_stock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryRepositoryResult<InventoryItem>;

    /// Deducts every demand or none of them.
    ///
    /// # Errors
    ///
    /// Any single shortfall aborts the whole batch with
    /// [`InventoryRepositoryError::InsufficientStock`] naming the offending
    /// item; no partial deduction is ever committed.
    async fn deduct_all(&self, demands: &[StockDemand]) -> InventoryRepositoryResult<()>;

    /// Atomically adds `amount` to an item and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryRepositoryError::NotFound`] when the item does not
    /// exist and [`InventoryRepositoryError::InvalidAmount`] for
    /// non-positive amounts.
    async fn restock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryRepositoryResult<InventoryItem>;
}

/// Errors returned by inventory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InventoryRepositoryError {
    /// An item with the same identifier already exists.
    #[error("duplicate inventory item identifier: {0}")]
    DuplicateItem(InventoryItemId),

    /// The item was not found.
    #[error("inventory item not found: {0}")]
    NotFound(InventoryItemId),

    /// Deduction was attempted against a retired item.
    #[error("inventory item {0} is inactive")]
    InactiveItem(InventoryItemId),

    /// A mutation amount was zero or negative.
    #[error("stock mutation amount must be positive, got {amount}")]
    InvalidAmount {
        /// The offending amount.
        amount: f64,
    },

    /// Not enough stock on hand to satisfy a deduction.
    #[error("insufficient stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The item that fell short.
        item_id: InventoryItemId,
        /// Quantity requested.
        requested: f64,
        /// Quantity actually available.
        available: f64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InventoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

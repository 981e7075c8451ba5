//! Service layer for the per-branch stock ledger.

use crate::inventory::{
    domain::{
        BranchId, InventoryDomainError, InventoryItem, InventoryItemId, StockLevel, StockStatus,
        Unit,
    },
    ports::{InventoryRepository, InventoryRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering an inventory item.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterItemRequest {
    branch_id: BranchId,
    name: String,
    unit: Unit,
    initial_quantity: f64,
    minimum_quantity: f64,
}

impl RegisterItemRequest {
    /// Creates a registration request with empty stock.
    #[must_use]
    pub fn new(branch_id: BranchId, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            branch_id,
            name: name.into(),
            unit,
            initial_quantity: 0.0,
            minimum_quantity: 0.0,
        }
    }

    /// Sets the opening stock quantity.
    #[must_use]
    pub const fn with_initial_quantity(mut self, quantity: f64) -> Self {
        self.initial_quantity = quantity;
        self
    }

    /// Sets the reorder threshold.
    #[must_use]
    pub const fn with_minimum_quantity(mut self, quantity: f64) -> Self {
        self.minimum_quantity = quantity;
        self
    }
}

/// Service-level errors for ledger operations.
#[derive(Debug, Error)]
pub enum InventoryLedgerError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] InventoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] InventoryRepositoryError),
    /// The requested item does not exist.
    #[error("inventory item not found: {0}")]
    ItemNotFound(InventoryItemId),
}

/// Result type for ledger service operations.
pub type InventoryLedgerResult<T> = Result<T, InventoryLedgerError>;

/// Stock ledger orchestration service.
#[derive(Clone)]
pub struct InventoryLedgerService<R, C>
where
    R: InventoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> InventoryLedgerService<R, C>
where
    R: InventoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new inventory item for a branch.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryLedgerError::Domain`] for invalid names or
    /// quantities and [`InventoryLedgerError::Repository`] when persistence
    /// fails.
    pub async fn register_item(
        &self,
        request: RegisterItemRequest,
    ) -> InventoryLedgerResult<InventoryItem> {
        let stock = StockLevel::new(request.initial_quantity, request.minimum_quantity)?;
        let item = InventoryItem::new(
            request.branch_id,
            request.name,
            request.unit,
            stock,
            &*self.clock,
        )?;
        self.repository.store(&item).await?;
        Ok(item)
    }

    /// Deducts stock from an item and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryLedgerError::Repository`] carrying
    /// [`InventoryRepositoryError::InsufficientStock`] when the deduction
    /// would drive stock negative; no state changes on failure.
    pub async fn deduct(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryLedgerResult<InventoryItem> {
        Ok(self.repository.deduct_stock(item_id, amount).await?)
    }

    /// Adds stock to an item and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryLedgerError::Repository`] when the item is missing
    /// or the amount is non-positive.
    pub async fn restock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryLedgerResult<InventoryItem> {
        Ok(self.repository.restock(item_id, amount).await?)
    }

    /// Derives the stock status of an item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryLedgerError::ItemNotFound`] when the item does not
    /// exist.
    pub async fn stock_status(
        &self,
        item_id: InventoryItemId,
    ) -> InventoryLedgerResult<StockStatus> {
        let item = self
            .repository
            .find_by_id(item_id)
            .await?
            .ok_or(InventoryLedgerError::ItemNotFound(item_id))?;
        Ok(item.status())
    }

    /// Lists every item belonging to a branch.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryLedgerError::Repository`] when the lookup fails.
    pub async fn list_for_branch(
        &self,
        branch_id: BranchId,
    ) -> InventoryLedgerResult<Vec<InventoryItem>> {
        Ok(self.repository.list_for_branch(branch_id).await?)
    }

    /// Lists the branch items at or below their reorder threshold.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryLedgerError::Repository`] when the lookup fails.
    pub async fn list_low_stock(
        &self,
        branch_id: BranchId,
    ) -> InventoryLedgerResult<Vec<InventoryItem>> {
        let mut items = self.repository.list_for_branch(branch_id).await?;
        items.retain(|item| item.status() != StockStatus::InStock);
        Ok(items)
    }
}

//! Thread-safe in-memory inventory repository.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::inventory::{
    domain::{BranchId, InventoryItem, InventoryItemId, StockMutationError},
    ports::{
        InventoryRepository, InventoryRepositoryError, InventoryRepositoryResult, StockDemand,
    },
};

/// Thread-safe in-memory inventory repository.
///
/// All stock arithmetic happens under a single write lock, giving the same
/// no-lost-update guarantee the store-side conditional updates provide in
/// production.
#[derive(Debug, Clone)]
pub struct InMemoryInventoryRepository<C: Clock + Send + Sync> {
    state: Arc<RwLock<HashMap<InventoryItemId, InventoryItem>>>,
    clock: C,
}

impl<C: Clock + Send + Sync> InMemoryInventoryRepository<C> {
    /// Creates an empty in-memory repository with the given clock.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

fn map_mutation(item_id: InventoryItemId, err: StockMutationError) -> InventoryRepositoryError {
    match err {
        StockMutationError::NonPositiveAmount { amount } => {
            InventoryRepositoryError::InvalidAmount { amount }
        }
        StockMutationError::InactiveItem { .. } => InventoryRepositoryError::InactiveItem(item_id),
        StockMutationError::InsufficientStock {
            requested,
            available,
        } => InventoryRepositoryError::InsufficientStock {
            item_id,
            requested,
            available,
        },
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> InventoryRepository for InMemoryInventoryRepository<C> {
    async fn store(&self, item: &InventoryItem) -> InventoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InventoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&item.id()) {
            return Err(InventoryRepositoryError::DuplicateItem(item.id()));
        }
        state.insert(item.id(), item.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: InventoryItemId,
    ) -> InventoryRepositoryResult<Option<InventoryItem>> {
        let state = self.state.read().map_err(|err| {
            InventoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_branch(
        &self,
        branch_id: BranchId,
    ) -> InventoryRepositoryResult<Vec<InventoryItem>> {
        let state = self.state.read().map_err(|err| {
            InventoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut items: Vec<InventoryItem> = state
            .values()
            .filter(|item| item.branch_id() == branch_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(items)
    }

    async fn deduct_stock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryRepositoryResult<InventoryItem> {
        let mut state = self.state.write().map_err(|err| {
            InventoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let item = state
            .get_mut(&item_id)
            .ok_or(InventoryRepositoryError::NotFound(item_id))?;
        item.deduct(amount, &self.clock)
            .map_err(|err| map_mutation(item_id, err))?;
        Ok(item.clone())
    }

    async fn deduct_all(&self, demands: &[StockDemand]) -> InventoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InventoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        // First pass applies every demand to a working copy; nothing is
        // written back until the whole batch has succeeded. Repeated item
        // ids within one batch deduct cumulatively.
        let mut working: HashMap<InventoryItemId, InventoryItem> = HashMap::new();
        for demand in demands {
            let mut item = working
                .get(&demand.item_id)
                .or_else(|| state.get(&demand.item_id))
                .cloned()
                .ok_or(InventoryRepositoryError::NotFound(demand.item_id))?;
            item.deduct(demand.amount, &self.clock)
                .map_err(|err| map_mutation(demand.item_id, err))?;
            working.insert(demand.item_id, item);
        }

        for (id, item) in working {
            state.insert(id, item);
        }
        Ok(())
    }

    async fn restock(
        &self,
        item_id: InventoryItemId,
        amount: f64,
    ) -> InventoryRepositoryResult<InventoryItem> {
        let mut state = self.state.write().map_err(|err| {
            InventoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let item = state
            .get_mut(&item_id)
            .ok_or(InventoryRepositoryError::NotFound(item_id))?;
        item.restock(amount, &self.clock)
            .map_err(|err| map_mutation(item_id, err))?;
        Ok(item.clone())
    }
}

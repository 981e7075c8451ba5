//! Thread-safe in-memory account repository.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::{Account, AccountId},
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};

/// Thread-safe in-memory account repository.
///
/// Holds its own clock so counter increments can stamp `updated_at` the way
/// the store-side update would.
#[derive(Debug, Clone)]
pub struct InMemoryAccountRepository<C: Clock + Send + Sync> {
    state: Arc<RwLock<HashMap<AccountId, Account>>>,
    clock: C,
}

impl<C: Clock + Send + Sync> InMemoryAccountRepository<C> {
    /// Creates an empty in-memory repository with the given clock.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> AccountRepository for InMemoryAccountRepository<C> {
    async fn store(&self, account: &Account) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&account.id()) {
            return Err(AccountRepositoryError::DuplicateAccount(account.id()));
        }
        state.insert(account.id(), account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&account.id()) {
            return Err(AccountRepositoryError::NotFound(account.id()));
        }
        state.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn increment_completed_tasks(&self, id: AccountId) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account = state
            .get_mut(&id)
            .ok_or(AccountRepositoryError::NotFound(id))?;
        account.record_completed_task(&self.clock);
        Ok(())
    }
}

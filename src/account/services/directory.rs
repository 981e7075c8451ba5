//! Service layer for account registration and lookup.

use crate::account::{
    domain::{Account, AccountDomainError, AccountId, Role},
    ports::{AccountRepository, AccountRepositoryError, NotificationDispatcher},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    full_name: String,
    role: Role,
}

impl RegisterAccountRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(full_name: impl Into<String>, role: Role) -> Self {
        Self {
            full_name: full_name.into(),
            role,
        }
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum AccountDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AccountRepositoryError),
}

/// Result type for directory service operations.
pub type AccountDirectoryResult<T> = Result<T, AccountDirectoryError>;

/// Account registration and lookup service.
#[derive(Clone)]
pub struct AccountDirectoryService<R, N, C>
where
    R: AccountRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, N, C> AccountDirectoryService<R, N, C>
where
    R: AccountRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            notifier,
            clock,
        }
    }

    /// Registers a new account and dispatches the credential notification.
    ///
    /// Notification delivery is fire-and-forget: a failed dispatch is
    /// logged and the registration still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDirectoryError`] when name validation fails or the
    /// repository rejects persistence.
    pub async fn register(
        &self,
        request: RegisterAccountRequest,
    ) -> AccountDirectoryResult<Account> {
        let account = Account::new(request.full_name, request.role, &*self.clock)?;
        self.repository.store(&account).await?;

        if let Err(err) = self.notifier.credentials_issued(account.id()).await {
            warn!(account_id = %account.id(), error = %err, "credential notification failed");
        }

        Ok(account)
    }

    /// Finds an account by identifier.
    ///
    /// Returns `Ok(None)` when no account exists.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDirectoryError::Repository`] when the lookup fails.
    pub async fn find(&self, id: AccountId) -> AccountDirectoryResult<Option<Account>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}

//! Account aggregate root.

use super::{AccountDomainError, AccountId, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    full_name: String,
    role: Role,
    completed_tasks: u32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAccountData {
    /// Persisted account identifier.
    pub id: AccountId,
    /// Persisted full name.
    pub full_name: String,
    /// Persisted role.
    pub role: Role,
    /// Persisted completed-task counter.
    pub completed_tasks: u32,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active account with a zeroed completed-task counter.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyFullName`] when the name is empty
    /// after trimming.
    pub fn new(
        full_name: impl Into<String>,
        role: Role,
        clock: &impl Clock,
    ) -> Result<Self, AccountDomainError> {
        let raw = full_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountDomainError::EmptyFullName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: AccountId::new(),
            full_name: trimmed.to_owned(),
            role,
            completed_tasks: 0,
            is_active: true,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAccountData) -> Self {
        Self {
            id: data.id,
            full_name: data.full_name,
            role: data.role,
            completed_tasks: data.completed_tasks,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the number of tasks completed for (clients) or by (workers)
    /// this account.
    #[must_use]
    pub const fn completed_tasks(&self) -> u32 {
        self.completed_tasks
    }

    /// Returns whether the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether this account can be assigned field work.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        self.is_active && matches!(self.role, Role::Worker)
    }

    /// Records one more completed task against this account.
    ///
    /// The counter is monotonically non-decreasing; only the task lifecycle
    /// engine calls this.
    pub fn record_completed_task(&mut self, clock: &impl Clock) {
        self.completed_tasks = self.completed_tasks.saturating_add(1);
        self.touch(clock);
    }

    /// Deactivates the account.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.is_active = false;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

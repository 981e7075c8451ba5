//! Recording notification dispatcher for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::AccountId,
    ports::{NotificationDispatcher, NotificationError, NotificationResult},
};
use crate::task::domain::TaskId;

/// A notification captured by [`InMemoryNotificationDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchedNotification {
    /// Credentials were issued to a new account.
    CredentialsIssued {
        /// The notified account.
        account_id: AccountId,
    },
    /// A task was assigned to a worker.
    TaskAssigned {
        /// The assigned worker.
        worker_id: AccountId,
        /// The assigned task.
        task_id: TaskId,
        /// When the task is scheduled.
        scheduled_for: DateTime<Utc>,
    },
}

/// In-memory dispatcher that records notifications instead of delivering.
///
/// Supports failure injection so callers' fire-and-forget handling can be
/// exercised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationDispatcher {
    sent: Arc<RwLock<Vec<DispatchedNotification>>>,
    failing: Arc<RwLock<bool>>,
}

impl InMemoryNotificationDispatcher {
    /// Creates a dispatcher that records every notification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent dispatch fail when `failing` is true.
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut guard) = self.failing.write() {
            *guard = failing;
        }
    }

    /// Returns the notifications recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<DispatchedNotification> {
        self.sent.read().map(|guard| guard.clone()).unwrap_or_default()
    }

    fn record(&self, notification: DispatchedNotification) -> NotificationResult<()> {
        let failing = self.failing.read().map(|guard| *guard).unwrap_or(false);
        if failing {
            return Err(NotificationError::dispatch(std::io::Error::other(
                "notification channel unavailable",
            )));
        }
        let mut sent = self.sent.write().map_err(|err| {
            NotificationError::dispatch(std::io::Error::other(err.to_string()))
        })?;
        sent.push(notification);
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryNotificationDispatcher {
    async fn credentials_issued(&self, account_id: AccountId) -> NotificationResult<()> {
        self.record(DispatchedNotification::CredentialsIssued { account_id })
    }

    async fn task_assigned(
        &self,
        worker_id: AccountId,
        task_id: TaskId,
        scheduled_for: DateTime<Utc>,
    ) -> NotificationResult<()> {
        self.record(DispatchedNotification::TaskAssigned {
            worker_id,
            task_id,
            scheduled_for,
        })
    }
}

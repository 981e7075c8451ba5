//! In-memory media host recording deletion requests.

use crate::media::domain::StorageId;
use crate::media::ports::{MediaHost, MediaHostError, MediaHostResult};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory [`MediaHost`] that records every deletion request.
///
/// Tests flip it into a failing mode to exercise best-effort deletion paths.
#[derive(Debug, Default)]
pub struct InMemoryMediaHost {
    deleted: RwLock<Vec<StorageId>>,
    failing: RwLock<bool>,
}

impl InMemoryMediaHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent deletion fail when `failing` is true.
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut guard) = self.failing.write() {
            *guard = failing;
        }
    }

    /// Returns the storage identifiers deleted so far.
    #[must_use]
    pub fn deleted(&self) -> Vec<StorageId> {
        self.deleted
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MediaHost for InMemoryMediaHost {
    async fn delete(&self, storage_id: &StorageId) -> MediaHostResult<()> {
        let failing = self
            .failing
            .read()
            .map_err(|_| MediaHostError::unavailable(std::io::Error::other("poisoned lock")))?;
        if *failing {
            return Err(MediaHostError::unavailable(std::io::Error::other(
                "simulated host outage",
            )));
        }
        drop(failing);

        let mut deleted = self
            .deleted
            .write()
            .map_err(|_| MediaHostError::unavailable(std::io::Error::other("poisoned lock")))?;
        deleted.push(storage_id.clone());
        Ok(())
    }
}

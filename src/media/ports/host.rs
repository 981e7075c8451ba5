//! Port for the external media hosting provider.

use crate::media::domain::StorageId;
use async_trait::async_trait;
use std::sync::Arc;

/// Result alias for media host operations.
pub type MediaHostResult<T> = Result<T, MediaHostError>;

/// Errors surfaced by media host implementations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaHostError {
    /// The hosting provider rejected or failed the request.
    #[error("media host unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl MediaHostError {
    /// Wraps a provider failure.
    pub fn unavailable(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(error))
    }
}

/// Abstraction over the external hosting provider's deletion endpoint.
///
/// Uploads happen outside the core; the core only ever asks the provider to
/// delete objects it no longer references.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Deletes the hosted object addressed by `storage_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MediaHostError::Unavailable`] when the provider cannot be
    /// reached or reports a failure.
    async fn delete(&self, storage_id: &StorageId) -> MediaHostResult<()>;
}

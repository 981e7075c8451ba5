//! Error types for media domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain media values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaDomainError {
    /// The external storage identifier is empty after trimming.
    #[error("storage identifier must not be empty")]
    EmptyStorageId,

    /// The delivery URL is empty after trimming.
    #[error("media URL must not be empty")]
    EmptyUrl,
}

/// Error returned while parsing media kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown media kind: {0}")]
pub struct ParseMediaKindError(pub String);

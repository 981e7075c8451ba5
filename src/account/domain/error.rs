//! Error types for account domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The full name is empty after trimming.
    #[error("account full name must not be empty")]
    EmptyFullName,

    /// The account is deactivated and cannot take part in the operation.
    #[error("account is deactivated")]
    Deactivated,
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

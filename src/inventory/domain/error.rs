//! Error types for the inventory domain.

use super::InventoryItemId;
use thiserror::Error;

/// Validation failures raised by inventory constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryDomainError {
    /// Item name is empty after trimming.
    #[error("inventory item name must not be empty")]
    EmptyName,

    /// A stock quantity was negative.
    #[error("stock quantity must not be negative, got {value}")]
    NegativeQuantity {
        /// The offending quantity.
        value: f64,
    },
}

/// Failures raised by stock mutation methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockMutationError {
    /// The mutation amount was zero or negative.
    #[error("stock mutation amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: f64,
    },

    /// Deduction was attempted against an inactive item.
    #[error("inventory item {item_id} is inactive")]
    InactiveItem {
        /// The inactive item.
        item_id: InventoryItemId,
    },

    /// Deduction would drive stock negative.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity requested.
        requested: f64,
        /// Quantity actually available.
        available: f64,
    },
}

/// Error raised when parsing a [`super::Unit`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid measurement unit: {0}")]
pub struct ParseUnitError(pub String);

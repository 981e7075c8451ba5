//! Inventory item aggregate and stock level value types.

use super::{BranchId, InventoryDomainError, InventoryItemId, StockMutationError, Unit};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Current and minimum stock for an item.
///
/// `current` never goes negative; the minimum is the reorder threshold that
/// drives the derived [`StockStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    current: f64,
    minimum: f64,
}

impl StockLevel {
    /// Creates a stock level from non-negative quantities.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::NegativeQuantity`] when either
    /// quantity is negative.
    pub fn new(current: f64, minimum: f64) -> Result<Self, InventoryDomainError> {
        if current < 0.0 {
            return Err(InventoryDomainError::NegativeQuantity { value: current });
        }
        if minimum < 0.0 {
            return Err(InventoryDomainError::NegativeQuantity { value: minimum });
        }
        Ok(Self { current, minimum })
    }

    /// Returns the quantity currently on hand.
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Returns the reorder threshold.
    #[must_use]
    pub const fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Derives the stock status from the current level and threshold.
    #[must_use]
    pub fn status(&self) -> StockStatus {
        if self.current <= 0.0 {
            StockStatus::OutOfStock
        } else if self.current <= self.minimum {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Derived availability status of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Nothing left on hand.
    OutOfStock,
    /// At or below the reorder threshold.
    LowStock,
    /// Above the reorder threshold.
    InStock,
}

impl StockStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfStock => "out_of_stock",
            Self::LowStock => "low_stock",
            Self::InStock => "in_stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Inventory item aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: InventoryItemId,
    branch_id: BranchId,
    name: String,
    unit: Unit,
    stock: StockLevel,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted inventory item.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedInventoryItemData {
    /// Persisted item identifier.
    pub id: InventoryItemId,
    /// Persisted owning branch.
    pub branch_id: BranchId,
    /// Persisted item name.
    pub name: String,
    /// Persisted measurement unit.
    pub unit: Unit,
    /// Persisted stock level.
    pub stock: StockLevel,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates a new active inventory item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        branch_id: BranchId,
        name: impl Into<String>,
        unit: Unit,
        stock: StockLevel,
        clock: &impl Clock,
    ) -> Result<Self, InventoryDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InventoryDomainError::EmptyName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: InventoryItemId::new(),
            branch_id,
            name: trimmed.to_owned(),
            unit,
            stock,
            is_active: true,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an inventory item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInventoryItemData) -> Self {
        Self {
            id: data.id,
            branch_id: data.branch_id,
            name: data.name,
            unit: data.unit,
            stock: data.stock,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> InventoryItemId {
        self.id
    }

    /// Returns the owning branch.
    #[must_use]
    pub const fn branch_id(&self) -> BranchId {
        self.branch_id
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the measurement unit.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the stock level.
    #[must_use]
    pub const fn stock(&self) -> StockLevel {
        self.stock
    }

    /// Returns whether the item is active.
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

    /// Derives the stock status.
    #[must_use]
    pub fn status(&self) -> StockStatus {
        self.stock.status()
    }

    /// Deducts `amount` from the current stock.
    ///
    /// # Errors
    ///
    /// Returns [`StockMutationError::NonPositiveAmount`] for a zero or
    /// negative amount, [`StockMutationError::InactiveItem`] when the item is
    /// inactive, and [`StockMutationError::InsufficientStock`] when the
    /// deduction would drive stock negative; the item is unchanged on any
    /// failure.
    pub fn deduct(&mut self, amount: f64, clock: &impl Clock) -> Result<(), StockMutationError> {
        if amount <= 0.0 {
            return Err(StockMutationError::NonPositiveAmount { amount });
        }
        if !self.is_active {
            return Err(StockMutationError::InactiveItem { item_id: self.id });
        }
        if amount > self.stock.current {
            return Err(StockMutationError::InsufficientStock {
                requested: amount,
                available: self.stock.current,
            });
        }

        #[expect(
            clippy::float_arithmetic,
            reason = "stock quantities are fractional for kg and liter units"
        )]
        {
            self.stock.current -= amount;
        }
        self.touch(clock);
        Ok(())
    }

    /// Adds `amount` to the current stock.
    ///
    /// # Errors
    ///
    /// Returns [`StockMutationError::NonPositiveAmount`] for a zero or
    /// negative amount.
    pub fn restock(&mut self, amount: f64, clock: &impl Clock) -> Result<(), StockMutationError> {
        if amount <= 0.0 {
            return Err(StockMutationError::NonPositiveAmount { amount });
        }

        #[expect(
            clippy::float_arithmetic,
            reason = "stock quantities are fractional for kg and liter units"
        )]
        {
            self.stock.current += amount;
        }
        self.touch(clock);
        Ok(())
    }

    /// Retires the item from active use.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.is_active = false;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

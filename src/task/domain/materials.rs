//! Materials consumed by a task and the task cost breakdown.

use super::TaskDomainError;
use crate::account::domain::AccountId;
use crate::inventory::domain::{InventoryItemId, Unit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmation stamp on a material line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialConfirmation {
    /// Who confirmed the material was used.
    pub confirmed_by: AccountId,
    /// When the confirmation was recorded.
    pub confirmed_at: DateTime<Utc>,
}

/// One planned material consumption on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    item_id: InventoryItemId,
    quantity: f64,
    unit: Unit,
    confirmation: Option<MaterialConfirmation>,
}

impl MaterialLine {
    /// Creates an unconfirmed material line.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NonPositiveQuantity`] for a zero or
    /// negative quantity.
    pub fn new(
        item_id: InventoryItemId,
        quantity: f64,
        unit: Unit,
    ) -> Result<Self, TaskDomainError> {
        if quantity <= 0.0 {
            return Err(TaskDomainError::NonPositiveQuantity { quantity });
        }
        Ok(Self {
            item_id,
            quantity,
            unit,
            confirmation: None,
        })
    }

    /// Returns the referenced inventory item.
    #[must_use]
    pub const fn item_id(&self) -> InventoryItemId {
        self.item_id
    }

    /// Returns the planned quantity.
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Returns the measurement unit.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the confirmation stamp, if the line was confirmed.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&MaterialConfirmation> {
        self.confirmation.as_ref()
    }

    /// Returns whether the line was confirmed.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmation.is_some()
    }

    pub(crate) const fn confirm(&mut self, confirmed_by: AccountId, confirmed_at: DateTime<Utc>) {
        self.confirmation = Some(MaterialConfirmation {
            confirmed_by,
            confirmed_at,
        });
    }
}

/// Cost breakdown of a task.
///
/// The total is derived from labor and materials at construction; it is
/// never stored or accepted from outside, so the books always balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cost {
    labor: f64,
    materials: f64,
    total: f64,
}

impl Cost {
    /// Creates a cost breakdown; the total is computed, not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeCost`] when either component is
    /// negative.
    pub fn new(labor: f64, materials: f64) -> Result<Self, TaskDomainError> {
        if labor < 0.0 {
            return Err(TaskDomainError::NegativeCost { value: labor });
        }
        if materials < 0.0 {
            return Err(TaskDomainError::NegativeCost { value: materials });
        }

        #[expect(
            clippy::float_arithmetic,
            reason = "cost totals are currency sums derived from the components"
        )]
        let total = labor + materials;
        Ok(Self {
            labor,
            materials,
            total,
        })
    }

    /// Creates a zero cost.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            labor: 0.0,
            materials: 0.0,
            total: 0.0,
        }
    }

    /// Returns the labor component.
    #[must_use]
    pub const fn labor(&self) -> f64 {
        self.labor
    }

    /// Returns the materials component.
    #[must_use]
    pub const fn materials(&self) -> f64 {
        self.materials
    }

    /// Returns the derived total.
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::zero()
    }
}

//! Domain model for the inventory context.

mod error;
mod ids;
mod item;
mod unit;

pub use error::{InventoryDomainError, ParseUnitError, StockMutationError};
pub use ids::{BranchId, InventoryItemId};
pub use item::{InventoryItem, PersistedInventoryItemData, StockLevel, StockStatus};
pub use unit::Unit;

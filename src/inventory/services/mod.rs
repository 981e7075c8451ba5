//! Services for the inventory context.

pub mod ledger;

pub use ledger::{
    InventoryLedgerError, InventoryLedgerResult, InventoryLedgerService, RegisterItemRequest,
};

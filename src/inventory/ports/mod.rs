//! Ports exposed by the inventory context.

pub mod repository;

pub use repository::{
    InventoryRepository, InventoryRepositoryError, InventoryRepositoryResult, StockDemand,
};

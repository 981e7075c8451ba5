//! In-memory inventory adapters for tests and local development.

pub mod store;

pub use store::InMemoryInventoryRepository;

//! In-memory task adapters for tests and local development.

pub mod store;

pub use store::InMemoryTaskRepository;

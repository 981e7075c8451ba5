//! In-memory media adapters for tests and local development.

pub mod host;

pub use host::InMemoryMediaHost;

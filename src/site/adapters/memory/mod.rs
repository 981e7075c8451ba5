//! In-memory site adapters for tests and local development.

pub mod registry;

pub use registry::InMemorySiteRepository;

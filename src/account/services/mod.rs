//! Orchestration services for the people directory.

pub mod directory;

pub use directory::{AccountDirectoryError, AccountDirectoryService, RegisterAccountRequest};

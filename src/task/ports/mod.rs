//! Ports exposed by the task context.

mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

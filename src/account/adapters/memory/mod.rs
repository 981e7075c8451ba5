//! In-memory adapters for account ports.

mod directory;
mod notifier;

pub use directory::InMemoryAccountRepository;
pub use notifier::{DispatchedNotification, InMemoryNotificationDispatcher};

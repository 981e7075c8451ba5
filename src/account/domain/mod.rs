//! Domain model for the people directory.
//!
//! Accounts model every person the system coordinates around: the admins
//! who dispatch work, the field workers who perform it, and the clients it
//! is performed for. All infrastructure concerns stay outside the domain
//! boundary.

mod account;
mod error;
mod ids;
mod principal;
mod role;

pub use account::{Account, PersistedAccountData};
pub use error::{AccountDomainError, ParseRoleError};
pub use ids::AccountId;
pub use principal::Principal;
pub use role::Role;

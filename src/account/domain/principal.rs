//! Authenticated caller identity threaded into every core operation.

use super::{AccountId, Role};

/// The authenticated caller, as supplied by the identity provider.
///
/// The core trusts this value as already authenticated and passes it
/// explicitly into every lifecycle, media, and feedback operation instead
/// of reading ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Account identifier of the caller.
    pub id: AccountId,
    /// Role granted to the caller.
    pub role: Role,
}

impl Principal {
    /// Creates a principal from its parts.
    #[must_use]
    pub const fn new(id: AccountId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns whether the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns whether the caller is the given account.
    #[must_use]
    pub fn acts_for(&self, account_id: AccountId) -> bool {
        self.id == account_id
    }
}

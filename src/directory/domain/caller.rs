//! Caller identity attached to every operation.

use super::{Role, RoleSet, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated identity on whose behalf an operation runs.
///
/// Produced by the identity port; services trust its role set and only
/// verify ownership relations against stored entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    user_id: UserId,
    roles: RoleSet,
}

impl Caller {
    /// Creates a caller identity.
    #[must_use]
    pub const fn new(user_id: UserId, roles: RoleSet) -> Self {
        Self { user_id, roles }
    }

    /// Returns the acting user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's role capability set.
    #[must_use]
    pub const fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Returns whether the caller holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// Returns whether the caller holds administrator capability.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// Returns whether the caller holds project management capability.
    #[must_use]
    pub fn is_project_manager(&self) -> bool {
        self.roles.is_project_manager()
    }
}

//! User aggregate root.

use super::{Caller, RoleSet, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A provisioned user with a validated role capability set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    roles: RoleSet,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted role capability set.
    pub roles: RoleSet,
    /// Identifier of the administrator who provisioned the user, if known.
    pub created_by: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user provisioned by the given administrator.
    #[must_use]
    pub fn new(roles: RoleSet, created_by: Option<UserId>, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            roles,
            created_by,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            roles: data.roles,
            created_by: data.created_by,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the role capability set.
    #[must_use]
    pub const fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Returns the provisioning administrator, if recorded.
    #[must_use]
    pub const fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the caller identity acting as this user.
    #[must_use]
    pub fn as_caller(&self) -> Caller {
        Caller::new(self.id, self.roles.clone())
    }
}

//! Role capability sets for authorization decisions.

use super::{DirectoryDomainError, ParseRoleError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A capability a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System administrator: provisions users and deletes any root entity.
    Admin,
    /// Owns teams and projects and assigns projects to teams.
    ProjectManager,
    /// Decomposes assigned projects into tasks and reviews subtask work.
    TeamLeader,
    /// Implements subtasks and submits evidence for review.
    TeamMember,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::TeamLeader => "team_leader",
            Self::TeamMember => "team_member",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "project_manager" => Ok(Self::ProjectManager),
            "team_leader" => Ok(Self::TeamLeader),
            "team_member" => Ok(Self::TeamMember),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated set of roles held by one user.
///
/// `Admin` and `ProjectManager` are exclusive capabilities; `TeamLeader`
/// and `TeamMember` may be combined on a single user. Authorization checks
/// test set membership, never a single role identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates a validated role set.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyRoleSet`] when no role is given
    /// and [`DirectoryDomainError::InvalidRoleCombination`] when `Admin` or
    /// `ProjectManager` is combined with any other role.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, DirectoryDomainError> {
        let set: BTreeSet<Role> = roles.into_iter().collect();
        if set.is_empty() {
            return Err(DirectoryDomainError::EmptyRoleSet);
        }
        let exclusive = [Role::Admin, Role::ProjectManager];
        for role in exclusive {
            if set.contains(&role) && set.len() > 1 {
                return Err(DirectoryDomainError::InvalidRoleCombination {
                    exclusive: role,
                    held: set.iter().copied().collect(),
                });
            }
        }
        Ok(Self(set))
    }

    /// Creates a set holding exactly one role.
    #[must_use]
    pub fn single(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// Returns whether the set contains the given role.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns whether the set grants administrator capability.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin)
    }

    /// Returns whether the set grants project management capability.
    #[must_use]
    pub fn is_project_manager(&self) -> bool {
        self.contains(Role::ProjectManager)
    }

    /// Iterates over the held roles in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.0 {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}

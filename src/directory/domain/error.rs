//! Error types for directory domain validation and parsing.

use super::Role;
use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// A user must hold at least one role.
    #[error("a user must hold at least one role")]
    EmptyRoleSet,

    /// An exclusive role was combined with other roles.
    #[error("role {exclusive} cannot be combined with other roles (held: {held:?})")]
    InvalidRoleCombination {
        /// The exclusive role present in the set.
        exclusive: Role,
        /// Every role the invalid set held.
        held: Vec<Role>,
    },

    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

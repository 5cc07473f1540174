//! Domain model for users, roles, and teams.
//!
//! The directory domain models role capability sets, user records, team
//! membership, and the caller identity attached to every operation, while
//! keeping all infrastructure concerns outside of the domain boundary.

mod caller;
mod error;
mod ids;
mod role;
mod team;
mod user;

pub(crate) use ids::entity_id;

pub use caller::Caller;
pub use error::{DirectoryDomainError, ParseRoleError};
pub use ids::{TeamId, UserId};
pub use role::{Role, RoleSet};
pub use team::{PersistedTeamData, Team, TeamName};
pub use user::{PersistedUserData, User};

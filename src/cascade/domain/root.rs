//! The entity a cascading deletion starts from.

use crate::assignment::domain::ProjectId;
use crate::directory::domain::{TeamId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The root entity of one cascading deletion.
///
/// Assignments, tasks, and subtasks are never deletion roots; they only
/// leave the system as part of a closure rooted at one of these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DeletionRoot {
    /// A user record.
    User(UserId),
    /// A team and the work anchored to it.
    Team(TeamId),
    /// A project and the work anchored to it.
    Project(ProjectId),
}

impl fmt::Display for DeletionRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Team(id) => write!(f, "team {id}"),
            Self::Project(id) => write!(f, "project {id}"),
        }
    }
}

impl From<UserId> for DeletionRoot {
    fn from(id: UserId) -> Self {
        Self::User(id)
    }
}

impl From<TeamId> for DeletionRoot {
    fn from(id: TeamId) -> Self {
        Self::Team(id)
    }
}

impl From<ProjectId> for DeletionRoot {
    fn from(id: ProjectId) -> Self {
        Self::Project(id)
    }
}

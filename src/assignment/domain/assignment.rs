//! Project-to-team assignment aggregate.

use super::{AssignmentDomainError, AssignmentId, ProjectId};
use crate::directory::domain::{TeamId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// The record binding one project to one team with a deadline.
///
/// An assignment is active until retired. The store guarantees at most one
/// active assignment per project; tasks anchor to an assignment and
/// thereby, transitively, to one project and one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    id: AssignmentId,
    project_id: ProjectId,
    team_id: TeamId,
    assigned_by: UserId,
    deadline: DateTime<Utc>,
    created_at: DateTime<Utc>,
    retired_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignmentData {
    /// Persisted assignment identifier.
    pub id: AssignmentId,
    /// Assigned project.
    pub project_id: ProjectId,
    /// Assigned team.
    pub team_id: TeamId,
    /// Project manager who made the assignment.
    pub assigned_by: UserId,
    /// Agreed delivery deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Retirement timestamp, when no longer active.
    pub retired_at: Option<DateTime<Utc>>,
}

impl ProjectAssignment {
    /// Creates a new active assignment.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        team_id: TeamId,
        assigned_by: UserId,
        deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            project_id,
            team_id,
            assigned_by,
            deadline,
            created_at: clock.utc(),
            retired_at: None,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            team_id: data.team_id,
            assigned_by: data.assigned_by,
            deadline: data.deadline,
            created_at: data.created_at,
            retired_at: data.retired_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the assigned project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the project manager who made the assignment.
    #[must_use]
    pub const fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    /// Returns the agreed delivery deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the retirement timestamp, when no longer active.
    #[must_use]
    pub const fn retired_at(&self) -> Option<DateTime<Utc>> {
        self.retired_at
    }

    /// Returns whether this assignment is the project's active one.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.retired_at.is_none()
    }

    /// Retires the assignment, making the project eligible for
    /// re-assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::AlreadyRetired`] when the
    /// assignment is not active.
    pub fn retire(&mut self, clock: &impl Clock) -> Result<(), AssignmentDomainError> {
        if self.retired_at.is_some() {
            return Err(AssignmentDomainError::AlreadyRetired(self.id));
        }
        self.retired_at = Some(clock.utc());
        Ok(())
    }
}

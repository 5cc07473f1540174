//! Hierarchy resolution port answering "who may act on what".

use crate::assignment::domain::{AssignmentId, ProjectId};
use crate::directory::domain::{TeamId, UserId};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// The team and ownership context of one project assignment.
///
/// Resolved fresh for every operation so roster changes take effect
/// immediately: task submitters are the team's current leaders, task
/// reviewers additionally include the project owner, subtask reviewers
/// are the current leaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamContext {
    /// The resolved assignment.
    pub assignment_id: AssignmentId,
    /// The assigned project.
    pub project_id: ProjectId,
    /// The project manager owning the project.
    pub project_owner: UserId,
    /// The assigned team.
    pub team_id: TeamId,
    /// The team's current leader roster.
    pub leader_ids: BTreeSet<UserId>,
    /// The team's current member roster.
    pub member_ids: BTreeSet<UserId>,
    /// Whether the assignment is still active (not retired).
    pub assignment_active: bool,
}

impl TeamContext {
    /// Returns whether the user may review work under this assignment's
    /// tasks (team leader or owning project manager).
    #[must_use]
    pub fn may_review_task(&self, user: UserId) -> bool {
        self.leader_ids.contains(&user) || self.project_owner == user
    }

    /// Returns whether the user may review subtask work (team leader).
    #[must_use]
    pub fn may_review_subtask(&self, user: UserId) -> bool {
        self.leader_ids.contains(&user)
    }

    /// Returns whether the user may submit task work (team leader).
    #[must_use]
    pub fn may_submit_task(&self, user: UserId) -> bool {
        self.leader_ids.contains(&user)
    }
}

/// Result type for hierarchy resolution.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Resolves an assignment to its team and ownership context.
#[async_trait]
pub trait HierarchyResolver: Send + Sync {
    /// Resolves the context for the given assignment.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::AssignmentNotFound`] when the assignment
    /// does not exist, or a dangling-reference error when the stored graph
    /// is inconsistent.
    async fn context_for_assignment(&self, id: AssignmentId) -> HierarchyResult<TeamContext>;
}

/// Errors returned by hierarchy resolution.
#[derive(Debug, Clone, Error)]
pub enum HierarchyError {
    /// The assignment does not exist.
    #[error("assignment not found: {0}")]
    AssignmentNotFound(AssignmentId),

    /// The assignment references a team that is not stored.
    #[error("assignment references unknown team: {0}")]
    TeamNotFound(TeamId),

    /// The assignment references a project that is not stored.
    #[error("assignment references unknown project: {0}")]
    ProjectNotFound(ProjectId),

    /// Resolution-layer failure.
    #[error("hierarchy resolution error: {0}")]
    Resolution(Arc<dyn std::error::Error + Send + Sync>),
}

impl HierarchyError {
    /// Wraps a resolution error.
    pub fn resolution(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Resolution(Arc::new(err))
    }
}

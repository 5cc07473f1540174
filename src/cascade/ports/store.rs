//! Store contract for computing and executing deletion closures.

use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment, ProjectId};
use crate::cascade::domain::DeletionClosure;
use crate::directory::domain::{Team, TeamId, User, UserId};
use crate::workitem::domain::{Subtask, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for cascade store operations.
pub type CascadeStoreResult<T> = Result<T, CascadeStoreError>;

/// The read and commit surface the cascade engine needs.
///
/// The reads answer reference queries across every entity type; `execute`
/// commits a fully computed closure atomically. Implementations must make
/// the commit all-or-nothing: either every deletion and unassignment in
/// the closure takes effect, or none does.
#[async_trait]
pub trait CascadeStore: Send + Sync {
    /// Finds a user by identifier.
    async fn find_user(&self, id: UserId) -> CascadeStoreResult<Option<User>>;

    /// Finds a team by identifier.
    async fn find_team(&self, id: TeamId) -> CascadeStoreResult<Option<Team>>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> CascadeStoreResult<Option<Project>>;

    /// Returns every team owned by the given project manager.
    async fn teams_created_by(&self, manager: UserId) -> CascadeStoreResult<Vec<Team>>;

    /// Returns every project owned by the given project manager.
    async fn projects_created_by(&self, manager: UserId) -> CascadeStoreResult<Vec<Project>>;

    /// Returns every team whose rosters reference the user.
    async fn teams_referencing(&self, user: UserId) -> CascadeStoreResult<Vec<Team>>;

    /// Returns every subtask whose assignee set references the user.
    async fn subtasks_assigned_to(&self, user: UserId) -> CascadeStoreResult<Vec<Subtask>>;

    /// Returns every assignment (active or retired) referencing the
    /// project.
    async fn assignments_for_project(
        &self,
        project: ProjectId,
    ) -> CascadeStoreResult<Vec<ProjectAssignment>>;

    /// Returns every assignment (active or retired) referencing the team.
    async fn assignments_for_team(
        &self,
        team: TeamId,
    ) -> CascadeStoreResult<Vec<ProjectAssignment>>;

    /// Returns every task anchored to the given assignment.
    async fn tasks_for_assignment(
        &self,
        assignment: AssignmentId,
    ) -> CascadeStoreResult<Vec<Task>>;

    /// Returns every subtask under the given task.
    async fn subtasks_for_task(&self, task: TaskId) -> CascadeStoreResult<Vec<Subtask>>;

    /// Commits the closure: deletes every recorded entity and scrubs the
    /// participant from every recorded surviving roster and assignee set.
    ///
    /// The closure is computed before the commit, so entities may appear
    /// beneath a doomed parent in between. Implementations must not let
    /// such late arrivals survive the commit: re-derive child membership
    /// at commit time, or bar creation beneath roots under deletion.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeStoreError::Persistence`] when the commit fails;
    /// the store must then be left unchanged.
    async fn execute(&self, closure: &DeletionClosure) -> CascadeStoreResult<()>;
}

/// Errors returned by cascade store implementations.
#[derive(Debug, Clone, Error)]
pub enum CascadeStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CascadeStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

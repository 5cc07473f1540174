//! Repository ports for project and assignment persistence.

use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment, ProjectId};
use crate::directory::domain::{TeamId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// project ID already exists.
    async fn insert(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns all projects owned by the given project manager.
    async fn created_by(&self, manager: UserId) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Assignment persistence contract.
///
/// Implementations enforce the single-active-assignment invariant with a
/// store-level uniqueness check on the project id, never by application
/// scanning, so concurrent assignment attempts cannot both succeed.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Stores a new assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::ActiveAssignmentExists`] when
    /// the project already has an active assignment,
    /// [`AssignmentRepositoryError::ProjectMissing`] or
    /// [`AssignmentRepositoryError::TeamMissing`] when a referenced entity
    /// is not stored, or
    /// [`AssignmentRepositoryError::DuplicateAssignment`] when the ID
    /// already exists.
    async fn insert(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()>;

    /// Persists changes to an existing assignment (retirement).
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::NotFound`] when the assignment
    /// does not exist.
    async fn update(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()>;

    /// Finds an assignment by identifier.
    ///
    /// Returns `None` when the assignment does not exist.
    async fn find(&self, id: AssignmentId) -> AssignmentRepositoryResult<Option<ProjectAssignment>>;

    /// Returns the project's active assignment, if any.
    async fn active_for_project(
        &self,
        project: ProjectId,
    ) -> AssignmentRepositoryResult<Option<ProjectAssignment>>;

    /// Returns every assignment (active or retired) referencing the
    /// project.
    async fn for_project(
        &self,
        project: ProjectId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>>;

    /// Returns every assignment (active or retired) referencing the team.
    async fn for_team(&self, team: TeamId) -> AssignmentRepositoryResult<Vec<ProjectAssignment>>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// An assignment with the same identifier already exists.
    #[error("duplicate assignment identifier: {0}")]
    DuplicateAssignment(AssignmentId),

    /// The assignment was not found.
    #[error("assignment not found: {0}")]
    NotFound(AssignmentId),

    /// The project already has an active assignment.
    #[error("project {0} already has an active assignment")]
    ActiveAssignmentExists(ProjectId),

    /// The referenced project is not stored.
    #[error("assignment references unknown project: {0}")]
    ProjectMissing(ProjectId),

    /// The referenced team is not stored.
    #[error("assignment references unknown team: {0}")]
    TeamMissing(TeamId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

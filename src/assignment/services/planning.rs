//! Service layer for project planning and assignment.

use crate::assignment::{
    domain::{
        AssignmentDomainError, AssignmentId, Project, ProjectAssignment, ProjectId, ProjectStatus,
    },
    ports::{
        AssignmentRepository, AssignmentRepositoryError, ProjectRepository,
        ProjectRepositoryError,
    },
};
use crate::directory::{
    domain::{Caller, TeamId, UserId},
    ports::{DirectoryRepositoryError, TeamRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    title: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates a request with the project title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Service-level errors for planning operations.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AssignmentDomainError),

    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),

    /// Assignment repository operation failed.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// Team lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),

    /// The caller lacks the capability required for the operation.
    #[error("user {user} is not authorized to perform this operation")]
    NotAuthorized {
        /// The acting user.
        user: UserId,
    },

    /// The caller does not own the targeted project.
    #[error("user {user} does not own project {project}")]
    NotProjectOwner {
        /// The targeted project.
        project: ProjectId,
        /// The acting user.
        user: UserId,
    },
}

/// Result type for planning service operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Project planning and assignment orchestration service.
#[derive(Clone)]
pub struct PlanningService<P, A, T, C>
where
    P: ProjectRepository,
    A: AssignmentRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    assignments: Arc<A>,
    teams: Arc<T>,
    clock: Arc<C>,
}

impl<P, A, T, C> PlanningService<P, A, T, C>
where
    P: ProjectRepository,
    A: AssignmentRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new planning service.
    #[must_use]
    pub const fn new(projects: Arc<P>, assignments: Arc<A>, teams: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            assignments,
            teams,
            clock,
        }
    }

    /// Creates a project owned by the calling project manager.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::NotAuthorized`] when the caller is not a
    /// project manager, or the underlying domain or repository error
    /// otherwise.
    pub async fn create_project(
        &self,
        caller: &Caller,
        request: CreateProjectRequest,
    ) -> PlanningResult<Project> {
        if !caller.is_project_manager() {
            return Err(PlanningError::NotAuthorized {
                user: caller.user_id(),
            });
        }
        let project = Project::new(
            request.title,
            request.description,
            caller.user_id(),
            &*self.clock,
        )?;
        self.projects.insert(&project).await?;
        Ok(project)
    }

    /// Sets a project's informational status.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::NotProjectOwner`] when the caller neither
    /// owns the project nor is an administrator, or the underlying
    /// repository error otherwise.
    pub async fn set_project_status(
        &self,
        caller: &Caller,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> PlanningResult<Project> {
        let mut project = self.owned_project(caller, project_id).await?;
        project.set_status(status, &*self.clock);
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Assigns a project to a team with a deadline.
    ///
    /// Only the project's owner may assign it. A project with an active
    /// assignment must have that assignment retired first.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::NotProjectOwner`] when the caller does not
    /// own the project,
    /// [`AssignmentRepositoryError::ActiveAssignmentExists`] (wrapped) when
    /// the project is already assigned, or the underlying repository error
    /// otherwise.
    pub async fn create_assignment(
        &self,
        caller: &Caller,
        project_id: ProjectId,
        team_id: TeamId,
        deadline: DateTime<Utc>,
    ) -> PlanningResult<ProjectAssignment> {
        let project = self
            .projects
            .find(project_id)
            .await?
            .ok_or(ProjectRepositoryError::NotFound(project_id))?;
        if project.created_by() != caller.user_id() {
            return Err(PlanningError::NotProjectOwner {
                project: project_id,
                user: caller.user_id(),
            });
        }
        self.teams
            .find(team_id)
            .await?
            .ok_or(DirectoryRepositoryError::TeamNotFound(team_id))?;

        let assignment = ProjectAssignment::new(
            project_id,
            team_id,
            caller.user_id(),
            deadline,
            &*self.clock,
        );
        self.assignments.insert(&assignment).await?;
        Ok(assignment)
    }

    /// Retires an assignment, making its project eligible for
    /// re-assignment. Tasks under the retired assignment stay anchored to
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::NotProjectOwner`] when the caller neither
    /// owns the assigned project nor is an administrator, or the underlying
    /// domain or repository error otherwise.
    pub async fn retire_assignment(
        &self,
        caller: &Caller,
        assignment_id: AssignmentId,
    ) -> PlanningResult<ProjectAssignment> {
        let mut assignment = self
            .assignments
            .find(assignment_id)
            .await?
            .ok_or(AssignmentRepositoryError::NotFound(assignment_id))?;
        self.owned_project(caller, assignment.project_id()).await?;
        assignment.retire(&*self.clock)?;
        self.assignments.update(&assignment).await?;
        Ok(assignment)
    }

    /// Finds a project by identifier.
    ///
    /// Returns `Ok(None)` when no project has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Projects`] when persistence lookup fails.
    pub async fn find_project(&self, id: ProjectId) -> PlanningResult<Option<Project>> {
        Ok(self.projects.find(id).await?)
    }

    /// Returns the project's active assignment, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Assignments`] when persistence lookup
    /// fails.
    pub async fn active_assignment(
        &self,
        project: ProjectId,
    ) -> PlanningResult<Option<ProjectAssignment>> {
        Ok(self.assignments.active_for_project(project).await?)
    }

    async fn owned_project(&self, caller: &Caller, project_id: ProjectId) -> PlanningResult<Project> {
        let project = self
            .projects
            .find(project_id)
            .await?
            .ok_or(ProjectRepositoryError::NotFound(project_id))?;
        if !caller.is_admin() && project.created_by() != caller.user_id() {
            return Err(PlanningError::NotProjectOwner {
                project: project_id,
                user: caller.user_id(),
            });
        }
        Ok(project)
    }
}

//! Assignment port implementations.

use super::InMemoryStore;
use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment, ProjectId};
use crate::assignment::ports::{
    AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult,
    ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
};
use crate::directory::domain::{TeamId, UserId};
use async_trait::async_trait;

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if !state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::NotFound(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn created_by(&self, manager: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.created_by() == manager)
            .cloned()
            .collect();
        projects.sort_by_key(Project::id);
        Ok(projects)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn insert(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()> {
        let mut state = self
            .write()
            .map_err(AssignmentRepositoryError::persistence)?;
        if state.assignments.contains_key(&assignment.id()) {
            return Err(AssignmentRepositoryError::DuplicateAssignment(
                assignment.id(),
            ));
        }
        if !state.projects.contains_key(&assignment.project_id()) {
            return Err(AssignmentRepositoryError::ProjectMissing(
                assignment.project_id(),
            ));
        }
        if !state.teams.contains_key(&assignment.team_id()) {
            return Err(AssignmentRepositoryError::TeamMissing(assignment.team_id()));
        }
        if assignment.is_active() {
            // The uniqueness index, not a scan, guards the one-active
            // invariant under the write lock.
            if state.active_assignments.contains_key(&assignment.project_id()) {
                return Err(AssignmentRepositoryError::ActiveAssignmentExists(
                    assignment.project_id(),
                ));
            }
            state
                .active_assignments
                .insert(assignment.project_id(), assignment.id());
        }
        state.assignments.insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn update(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()> {
        let mut state = self
            .write()
            .map_err(AssignmentRepositoryError::persistence)?;
        if !state.assignments.contains_key(&assignment.id()) {
            return Err(AssignmentRepositoryError::NotFound(assignment.id()));
        }
        if !assignment.is_active() {
            let indexed = state.active_assignments.get(&assignment.project_id());
            if indexed == Some(&assignment.id()) {
                state.active_assignments.remove(&assignment.project_id());
            }
        }
        state.assignments.insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn find(
        &self,
        id: AssignmentId,
    ) -> AssignmentRepositoryResult<Option<ProjectAssignment>> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        Ok(state.assignments.get(&id).cloned())
    }

    async fn active_for_project(
        &self,
        project: ProjectId,
    ) -> AssignmentRepositoryResult<Option<ProjectAssignment>> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        Ok(state
            .active_assignments
            .get(&project)
            .and_then(|id| state.assignments.get(id))
            .cloned())
    }

    async fn for_project(
        &self,
        project: ProjectId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        let mut assignments: Vec<ProjectAssignment> = state
            .assignments
            .values()
            .filter(|assignment| assignment.project_id() == project)
            .cloned()
            .collect();
        assignments.sort_by_key(ProjectAssignment::id);
        Ok(assignments)
    }

    async fn for_team(&self, team: TeamId) -> AssignmentRepositoryResult<Vec<ProjectAssignment>> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        let mut assignments: Vec<ProjectAssignment> = state
            .assignments
            .values()
            .filter(|assignment| assignment.team_id() == team)
            .cloned()
            .collect();
        assignments.sort_by_key(ProjectAssignment::id);
        Ok(assignments)
    }
}

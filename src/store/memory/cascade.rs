//! Cascade store implementation: reference queries and atomic commits.

use super::{InMemoryStore, StoreState};
use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment, ProjectId};
use crate::cascade::domain::DeletionClosure;
use crate::cascade::ports::{CascadeStore, CascadeStoreError, CascadeStoreResult};
use crate::directory::domain::{Team, TeamId, User, UserId};
use crate::workitem::domain::{Subtask, Task, TaskId};
use async_trait::async_trait;

fn apply(state: &mut StoreState, closure: &DeletionClosure) {
    // The closure was computed under read locks that have long been
    // released. Re-derive child membership from the live state here,
    // under the write lock, so an entity created beneath a doomed
    // parent in the meantime leaves with it instead of surviving as an
    // orphan.
    let mut teams = closure.teams().clone();
    for (id, team) in &state.teams {
        if closure.users().contains(&team.created_by()) {
            teams.insert(*id);
        }
    }
    let mut projects = closure.projects().clone();
    for (id, project) in &state.projects {
        if closure.users().contains(&project.created_by()) {
            projects.insert(*id);
        }
    }
    let mut assignments = closure.assignments().clone();
    for (id, assignment) in &state.assignments {
        if projects.contains(&assignment.project_id()) || teams.contains(&assignment.team_id()) {
            assignments.insert(*id);
        }
    }
    let mut tasks = closure.tasks().clone();
    for (id, task) in &state.tasks {
        if assignments.contains(&task.assignment_id()) {
            tasks.insert(*id);
        }
    }
    let mut subtasks = closure.subtasks().clone();
    for (id, subtask) in &state.subtasks {
        if tasks.contains(&subtask.parent_task_id()) {
            subtasks.insert(*id);
        }
    }

    // Leaf to root, so no intermediate view of the maps ever has a
    // child outliving its parent.
    for id in &subtasks {
        state.subtasks.remove(id);
    }
    for id in &tasks {
        state.tasks.remove(id);
    }
    for id in &assignments {
        if let Some(assignment) = state.assignments.remove(id) {
            let indexed = state.active_assignments.get(&assignment.project_id());
            if indexed == Some(id) {
                state.active_assignments.remove(&assignment.project_id());
            }
        }
    }
    for id in &projects {
        state.projects.remove(id);
        state.active_assignments.remove(id);
    }
    for id in &teams {
        state.teams.remove(id);
    }
    for id in closure.users() {
        state.users.remove(id);
    }

    if let Some(user) = closure.participant() {
        for id in closure.team_unassignments() {
            if let Some(team) = state.teams.get_mut(id) {
                team.unassign(user);
            }
        }
        for id in closure.subtask_unassignments() {
            if let Some(subtask) = state.subtasks.get_mut(id) {
                subtask.unassign(user);
            }
        }
    }
}

#[async_trait]
impl CascadeStore for InMemoryStore {
    async fn find_user(&self, id: UserId) -> CascadeStoreResult<Option<User>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_team(&self, id: TeamId) -> CascadeStoreResult<Option<Team>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn find_project(&self, id: ProjectId) -> CascadeStoreResult<Option<Project>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn teams_created_by(&self, manager: UserId) -> CascadeStoreResult<Vec<Team>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut teams: Vec<Team> = state
            .teams
            .values()
            .filter(|team| team.created_by() == manager)
            .cloned()
            .collect();
        teams.sort_by_key(Team::id);
        Ok(teams)
    }

    async fn projects_created_by(&self, manager: UserId) -> CascadeStoreResult<Vec<Project>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.created_by() == manager)
            .cloned()
            .collect();
        projects.sort_by_key(Project::id);
        Ok(projects)
    }

    async fn teams_referencing(&self, user: UserId) -> CascadeStoreResult<Vec<Team>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut teams: Vec<Team> = state
            .teams
            .values()
            .filter(|team| team.references(user))
            .cloned()
            .collect();
        teams.sort_by_key(Team::id);
        Ok(teams)
    }

    async fn subtasks_assigned_to(&self, user: UserId) -> CascadeStoreResult<Vec<Subtask>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut subtasks: Vec<Subtask> = state
            .subtasks
            .values()
            .filter(|subtask| subtask.is_assignee(user))
            .cloned()
            .collect();
        subtasks.sort_by_key(Subtask::id);
        Ok(subtasks)
    }

    async fn assignments_for_project(
        &self,
        project: ProjectId,
    ) -> CascadeStoreResult<Vec<ProjectAssignment>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut assignments: Vec<ProjectAssignment> = state
            .assignments
            .values()
            .filter(|assignment| assignment.project_id() == project)
            .cloned()
            .collect();
        assignments.sort_by_key(ProjectAssignment::id);
        Ok(assignments)
    }

    async fn assignments_for_team(
        &self,
        team: TeamId,
    ) -> CascadeStoreResult<Vec<ProjectAssignment>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut assignments: Vec<ProjectAssignment> = state
            .assignments
            .values()
            .filter(|assignment| assignment.team_id() == team)
            .cloned()
            .collect();
        assignments.sort_by_key(ProjectAssignment::id);
        Ok(assignments)
    }

    async fn tasks_for_assignment(
        &self,
        assignment: AssignmentId,
    ) -> CascadeStoreResult<Vec<Task>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.assignment_id() == assignment)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::id);
        Ok(tasks)
    }

    async fn subtasks_for_task(&self, task: TaskId) -> CascadeStoreResult<Vec<Subtask>> {
        let state = self.read().map_err(CascadeStoreError::persistence)?;
        let mut subtasks: Vec<Subtask> = state
            .subtasks
            .values()
            .filter(|subtask| subtask.parent_task_id() == task)
            .cloned()
            .collect();
        subtasks.sort_by_key(Subtask::id);
        Ok(subtasks)
    }

    async fn execute(&self, closure: &DeletionClosure) -> CascadeStoreResult<()> {
        let mut state = self.write().map_err(CascadeStoreError::persistence)?;
        // Mutate a copy, then swap, so a panic mid-apply can never leave
        // the shared state half-committed.
        let mut next = state.clone();
        apply(&mut next, closure);
        *state = next;
        Ok(())
    }
}

//! Hierarchy resolution over the stored entity graph.

use super::InMemoryStore;
use crate::assignment::domain::AssignmentId;
use crate::workitem::ports::{HierarchyError, HierarchyResolver, HierarchyResult, TeamContext};
use async_trait::async_trait;

#[async_trait]
impl HierarchyResolver for InMemoryStore {
    async fn context_for_assignment(&self, id: AssignmentId) -> HierarchyResult<TeamContext> {
        let state = self.read().map_err(HierarchyError::resolution)?;
        let assignment = state
            .assignments
            .get(&id)
            .ok_or(HierarchyError::AssignmentNotFound(id))?;
        let team = state
            .teams
            .get(&assignment.team_id())
            .ok_or_else(|| HierarchyError::TeamNotFound(assignment.team_id()))?;
        let project = state
            .projects
            .get(&assignment.project_id())
            .ok_or_else(|| HierarchyError::ProjectNotFound(assignment.project_id()))?;
        Ok(TeamContext {
            assignment_id: id,
            project_id: project.id(),
            project_owner: project.created_by(),
            team_id: team.id(),
            leader_ids: team.leader_ids().clone(),
            member_ids: team.member_ids().clone(),
            assignment_active: assignment.is_active(),
        })
    }
}

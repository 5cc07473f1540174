//! Audit view of an executed cascade.

use super::{DeletionClosure, DeletionRoot};
use crate::assignment::domain::{AssignmentId, ProjectId};
use crate::directory::domain::{TeamId, UserId};
use crate::workitem::domain::{SubtaskId, TaskId};
use std::collections::BTreeSet;

/// What one executed cascade removed and scrubbed.
///
/// Returned to the caller after the store has committed the closure, so
/// the identifier sets describe records that are already gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeResult {
    root: DeletionRoot,
    removed_users: BTreeSet<UserId>,
    removed_teams: BTreeSet<TeamId>,
    removed_projects: BTreeSet<ProjectId>,
    removed_assignments: BTreeSet<AssignmentId>,
    removed_tasks: BTreeSet<TaskId>,
    removed_subtasks: BTreeSet<SubtaskId>,
    unassigned_teams: BTreeSet<TeamId>,
    unassigned_subtasks: BTreeSet<SubtaskId>,
}

impl CascadeResult {
    /// Returns the deletion root.
    #[must_use]
    pub const fn root(&self) -> DeletionRoot {
        self.root
    }

    /// Returns the deleted user records.
    #[must_use]
    pub const fn removed_users(&self) -> &BTreeSet<UserId> {
        &self.removed_users
    }

    /// Returns the deleted teams.
    #[must_use]
    pub const fn removed_teams(&self) -> &BTreeSet<TeamId> {
        &self.removed_teams
    }

    /// Returns the deleted projects.
    #[must_use]
    pub const fn removed_projects(&self) -> &BTreeSet<ProjectId> {
        &self.removed_projects
    }

    /// Returns the deleted assignments.
    #[must_use]
    pub const fn removed_assignments(&self) -> &BTreeSet<AssignmentId> {
        &self.removed_assignments
    }

    /// Returns the deleted tasks.
    #[must_use]
    pub const fn removed_tasks(&self) -> &BTreeSet<TaskId> {
        &self.removed_tasks
    }

    /// Returns the deleted subtasks.
    #[must_use]
    pub const fn removed_subtasks(&self) -> &BTreeSet<SubtaskId> {
        &self.removed_subtasks
    }

    /// Returns the surviving teams whose rosters were scrubbed.
    #[must_use]
    pub const fn unassigned_teams(&self) -> &BTreeSet<TeamId> {
        &self.unassigned_teams
    }

    /// Returns the surviving subtasks whose assignee sets were scrubbed.
    #[must_use]
    pub const fn unassigned_subtasks(&self) -> &BTreeSet<SubtaskId> {
        &self.unassigned_subtasks
    }

    /// Returns the total number of deleted records.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed_users.len()
            + self.removed_teams.len()
            + self.removed_projects.len()
            + self.removed_assignments.len()
            + self.removed_tasks.len()
            + self.removed_subtasks.len()
    }
}

impl From<DeletionClosure> for CascadeResult {
    fn from(closure: DeletionClosure) -> Self {
        Self {
            root: closure.root(),
            removed_users: closure.users().clone(),
            removed_teams: closure.teams().clone(),
            removed_projects: closure.projects().clone(),
            removed_assignments: closure.assignments().clone(),
            removed_tasks: closure.tasks().clone(),
            removed_subtasks: closure.subtasks().clone(),
            unassigned_teams: closure.team_unassignments().clone(),
            unassigned_subtasks: closure.subtask_unassignments().clone(),
        }
    }
}

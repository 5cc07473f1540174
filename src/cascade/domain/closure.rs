//! The transitive set of records one deletion removes or scrubs.

use super::DeletionRoot;
use crate::assignment::domain::{AssignmentId, ProjectId};
use crate::directory::domain::{TeamId, UserId};
use crate::workitem::domain::{SubtaskId, TaskId};
use std::collections::BTreeSet;

/// The computed closure of one cascading deletion.
///
/// The closure is computed in full before anything is touched, then
/// executed atomically. Deletion sets hold records that leave the store;
/// the unassignment sets hold records that survive but lose every
/// reference to the scrubbed participant. Each `record_*` method is
/// idempotent and reports whether the entry was new, so graph traversal
/// never expands the same node twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionClosure {
    root: DeletionRoot,
    users: BTreeSet<UserId>,
    teams: BTreeSet<TeamId>,
    projects: BTreeSet<ProjectId>,
    assignments: BTreeSet<AssignmentId>,
    tasks: BTreeSet<TaskId>,
    subtasks: BTreeSet<SubtaskId>,
    participant: Option<UserId>,
    team_unassignments: BTreeSet<TeamId>,
    subtask_unassignments: BTreeSet<SubtaskId>,
}

impl DeletionClosure {
    /// Creates an empty closure for the given root.
    #[must_use]
    pub const fn new(root: DeletionRoot) -> Self {
        Self {
            root,
            users: BTreeSet::new(),
            teams: BTreeSet::new(),
            projects: BTreeSet::new(),
            assignments: BTreeSet::new(),
            tasks: BTreeSet::new(),
            subtasks: BTreeSet::new(),
            participant: None,
            team_unassignments: BTreeSet::new(),
            subtask_unassignments: BTreeSet::new(),
        }
    }

    /// Returns the deletion root.
    #[must_use]
    pub const fn root(&self) -> DeletionRoot {
        self.root
    }

    /// Records a user for deletion. Returns `true` when newly recorded.
    pub fn record_user(&mut self, id: UserId) -> bool {
        self.users.insert(id)
    }

    /// Records a team for deletion. Returns `true` when newly recorded.
    pub fn record_team(&mut self, id: TeamId) -> bool {
        self.teams.insert(id)
    }

    /// Records a project for deletion. Returns `true` when newly recorded.
    pub fn record_project(&mut self, id: ProjectId) -> bool {
        self.projects.insert(id)
    }

    /// Records an assignment for deletion. Returns `true` when newly
    /// recorded.
    pub fn record_assignment(&mut self, id: AssignmentId) -> bool {
        self.assignments.insert(id)
    }

    /// Records a task for deletion. Returns `true` when newly recorded.
    pub fn record_task(&mut self, id: TaskId) -> bool {
        self.tasks.insert(id)
    }

    /// Records a subtask for deletion. Returns `true` when newly recorded.
    pub fn record_subtask(&mut self, id: SubtaskId) -> bool {
        self.subtasks.insert(id)
    }

    /// Marks the user whose surviving references get scrubbed.
    pub fn record_participant(&mut self, user: UserId) {
        self.participant = Some(user);
    }

    /// Records a surviving team whose rosters drop the participant.
    pub fn record_team_unassignment(&mut self, id: TeamId) -> bool {
        self.team_unassignments.insert(id)
    }

    /// Records a surviving subtask whose assignee set drops the
    /// participant.
    pub fn record_subtask_unassignment(&mut self, id: SubtaskId) -> bool {
        self.subtask_unassignments.insert(id)
    }

    /// Returns whether the team is already recorded for deletion.
    #[must_use]
    pub fn deletes_team(&self, id: TeamId) -> bool {
        self.teams.contains(&id)
    }

    /// Returns whether the subtask is already recorded for deletion.
    #[must_use]
    pub fn deletes_subtask(&self, id: SubtaskId) -> bool {
        self.subtasks.contains(&id)
    }

    /// Returns the users recorded for deletion.
    #[must_use]
    pub const fn users(&self) -> &BTreeSet<UserId> {
        &self.users
    }

    /// Returns the teams recorded for deletion.
    #[must_use]
    pub const fn teams(&self) -> &BTreeSet<TeamId> {
        &self.teams
    }

    /// Returns the projects recorded for deletion.
    #[must_use]
    pub const fn projects(&self) -> &BTreeSet<ProjectId> {
        &self.projects
    }

    /// Returns the assignments recorded for deletion.
    #[must_use]
    pub const fn assignments(&self) -> &BTreeSet<AssignmentId> {
        &self.assignments
    }

    /// Returns the tasks recorded for deletion.
    #[must_use]
    pub const fn tasks(&self) -> &BTreeSet<TaskId> {
        &self.tasks
    }

    /// Returns the subtasks recorded for deletion.
    #[must_use]
    pub const fn subtasks(&self) -> &BTreeSet<SubtaskId> {
        &self.subtasks
    }

    /// Returns the user whose surviving references get scrubbed, if any.
    #[must_use]
    pub const fn participant(&self) -> Option<UserId> {
        self.participant
    }

    /// Returns the surviving teams whose rosters drop the participant.
    #[must_use]
    pub const fn team_unassignments(&self) -> &BTreeSet<TeamId> {
        &self.team_unassignments
    }

    /// Returns the surviving subtasks whose assignee sets drop the
    /// participant.
    #[must_use]
    pub const fn subtask_unassignments(&self) -> &BTreeSet<SubtaskId> {
        &self.subtask_unassignments
    }

    /// Returns the total number of records leaving the store.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.users.len()
            + self.teams.len()
            + self.projects.len()
            + self.assignments.len()
            + self.tasks.len()
            + self.subtasks.len()
    }
}

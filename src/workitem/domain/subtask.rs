//! Subtask aggregate root.

use super::{
    Feedback, PersistedLifecycleData, Submission, SubtaskId, TaskId, WorkItemDomainError,
    WorkItemId, WorkItemLifecycle, WorkItemStatus,
};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A unit of task work assigned to individual team members.
///
/// The assignee set starts as a non-empty subset of the team's member
/// roster. Participant deletion may empty it; the subtask then stays
/// alive, keeps its status, and waits for manual reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    parent_task_id: TaskId,
    title: String,
    description: String,
    deadline: DateTime<Utc>,
    assigned_to: BTreeSet<UserId>,
    lifecycle: WorkItemLifecycle,
}

/// Parameter object for reconstructing a persisted subtask aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubtaskData {
    /// Persisted subtask identifier.
    pub id: SubtaskId,
    /// Parent task.
    pub parent_task_id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted assignee set.
    pub assigned_to: BTreeSet<UserId>,
    /// Persisted lifecycle state.
    pub lifecycle: PersistedLifecycleData,
}

impl Subtask {
    /// Creates a new pending subtask under the given task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyTitle`] when the title is empty
    /// after trimming, or [`WorkItemDomainError::EmptyAssigneeSet`] when no
    /// assignee is given.
    pub fn new(
        parent_task_id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        assigned_to: BTreeSet<UserId>,
        deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<Self, WorkItemDomainError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(WorkItemDomainError::EmptyTitle);
        }
        if assigned_to.is_empty() {
            return Err(WorkItemDomainError::EmptyAssigneeSet);
        }
        Ok(Self {
            id: SubtaskId::new(),
            parent_task_id,
            title,
            description: description.into(),
            deadline,
            assigned_to,
            lifecycle: WorkItemLifecycle::start(clock),
        })
    }

    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubtaskData) -> Self {
        Self {
            id: data.id,
            parent_task_id: data.parent_task_id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            assigned_to: data.assigned_to,
            lifecycle: WorkItemLifecycle::from_persisted(data.lifecycle),
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask identifier as a work-item identifier.
    #[must_use]
    pub const fn work_item_id(&self) -> WorkItemId {
        WorkItemId::Subtask(self.id)
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn parent_task_id(&self) -> TaskId {
        self.parent_task_id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the subtask description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the assignee set.
    #[must_use]
    pub const fn assigned_to(&self) -> &BTreeSet<UserId> {
        &self.assigned_to
    }

    /// Returns whether the user is an assignee.
    #[must_use]
    pub fn is_assignee(&self, user: UserId) -> bool {
        self.assigned_to.contains(&user)
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> &WorkItemLifecycle {
        &self.lifecycle
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> WorkItemStatus {
        self.lifecycle.status()
    }

    /// Returns the optimistic version stamp.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.lifecycle.version()
    }

    /// Returns whether the deadline has passed. Deadlines are
    /// informational; an overdue item keeps its status until someone acts.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now
    }

    /// Replaces the assignee set.
    ///
    /// Bumps the version stamp so a transition racing the reassignment
    /// fails its version check.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyAssigneeSet`] when the
    /// replacement set is empty.
    pub fn reassign(&mut self, assigned_to: BTreeSet<UserId>) -> Result<(), WorkItemDomainError> {
        if assigned_to.is_empty() {
            return Err(WorkItemDomainError::EmptyAssigneeSet);
        }
        self.assigned_to = assigned_to;
        self.lifecycle.invalidate();
        Ok(())
    }

    /// Removes the user from the assignee set without any cascading
    /// effect. The set may become empty; the subtask stays alive.
    ///
    /// Returns `true` when the user was assigned. Used by the cascade
    /// engine when a team participant is deleted.
    pub fn unassign(&mut self, user: UserId) -> bool {
        let removed = self.assigned_to.remove(&user);
        if removed {
            self.lifecycle.invalidate();
        }
        removed
    }

    /// Records a submission. See [`WorkItemLifecycle::submit`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::InvalidTransition`] when the current
    /// status does not accept a submission.
    pub fn submit(
        &mut self,
        submission: Submission,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        self.lifecycle.submit(self.work_item_id(), submission, clock)
    }

    /// Approves the submitted work. See [`WorkItemLifecycle::approve`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::InvalidTransition`] when the current
    /// status does not accept approval.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), WorkItemDomainError> {
        self.lifecycle.approve(self.work_item_id(), clock)
    }

    /// Rejects the submitted work. See [`WorkItemLifecycle::reject`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::InvalidTransition`] when the current
    /// status does not accept rejection.
    pub fn reject(
        &mut self,
        feedback: Feedback,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        self.lifecycle.reject(self.work_item_id(), feedback, clock)
    }
}

//! Task aggregate root.

use super::{
    Feedback, PersistedLifecycleData, Submission, TaskId, WorkItemDomainError, WorkItemId,
    WorkItemLifecycle, WorkItemStatus,
};
use crate::assignment::domain::AssignmentId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of project work, always anchored to one project assignment and
/// thereby to one project and one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    assignment_id: AssignmentId,
    title: String,
    description: String,
    deadline: DateTime<Utc>,
    lifecycle: WorkItemLifecycle,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Anchoring assignment.
    pub assignment_id: AssignmentId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted lifecycle state.
    pub lifecycle: PersistedLifecycleData,
}

impl Task {
    /// Creates a new pending task under the given assignment.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        assignment_id: AssignmentId,
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<Self, WorkItemDomainError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(WorkItemDomainError::EmptyTitle);
        }
        Ok(Self {
            id: TaskId::new(),
            assignment_id,
            title,
            description: description.into(),
            deadline,
            lifecycle: WorkItemLifecycle::start(clock),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            assignment_id: data.assignment_id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            lifecycle: WorkItemLifecycle::from_persisted(data.lifecycle),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task identifier as a work-item identifier.
    #[must_use]
    pub const fn work_item_id(&self) -> WorkItemId {
        WorkItemId::Task(self.id)
    }

    /// Returns the anchoring assignment.
    #[must_use]
    pub const fn assignment_id(&self) -> AssignmentId {
        self.assignment_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
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

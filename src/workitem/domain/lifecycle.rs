//! The status state machine shared by tasks and subtasks.

use super::{
    Feedback, Submission, WorkItemAction, WorkItemDomainError, WorkItemId, WorkItemStatus,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Lifecycle state embedded in every work item.
///
/// Carries the status, the latest submission, and an optimistic version
/// stamp bumped on every mutation. Repositories compare the stamp on
/// update so concurrent conflicting transitions resolve deterministically:
/// the loser observes a stale-version error instead of silently winning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemLifecycle {
    status: WorkItemStatus,
    submission: Option<Submission>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLifecycleData {
    /// Persisted status.
    pub status: WorkItemStatus,
    /// Persisted latest submission, if any.
    pub submission: Option<Submission>,
    /// Persisted version stamp.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WorkItemLifecycle {
    /// Creates a pending lifecycle at version zero.
    #[must_use]
    pub fn start(clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            status: WorkItemStatus::Pending,
            submission: None,
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a lifecycle from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLifecycleData) -> Self {
        Self {
            status: data.status,
            submission: data.submission,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> WorkItemStatus {
        self.status
    }

    /// Returns the latest submission, if any.
    #[must_use]
    pub const fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Returns the optimistic version stamp.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a submission, moving the item to `In Progress`.
    ///
    /// A repeated submission while already `In Progress` overwrites the
    /// previous evidence; the engine permits this deliberately.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::InvalidTransition`] when the status
    /// does not accept a submission. The lifecycle is left unchanged.
    pub fn submit(
        &mut self,
        item: WorkItemId,
        submission: Submission,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        self.guard(item, WorkItemAction::Submit)?;
        self.status = WorkItemStatus::InProgress;
        self.submission = Some(submission);
        self.bump(clock);
        Ok(())
    }

    /// Accepts the submitted work, moving the item to `Completed`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::InvalidTransition`] when the status
    /// does not accept approval. The lifecycle is left unchanged.
    pub fn approve(
        &mut self,
        item: WorkItemId,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        self.guard(item, WorkItemAction::Approve)?;
        self.status = WorkItemStatus::Completed;
        self.bump(clock);
        Ok(())
    }

    /// Rejects the submitted work, moving the item to `Re Assigned`.
    ///
    /// The feedback overwrites the submission's context field; the
    /// submitter's original explanation is not retained.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::InvalidTransition`] when the status
    /// does not accept rejection. The lifecycle is left unchanged.
    pub fn reject(
        &mut self,
        item: WorkItemId,
        feedback: Feedback,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        self.guard(item, WorkItemAction::Reject)?;
        self.status = WorkItemStatus::ReAssigned;
        if let Some(submission) = &mut self.submission {
            submission.overwrite_context(feedback.into_inner());
        }
        self.bump(clock);
        Ok(())
    }

    /// Bumps the version stamp without a lifecycle transition.
    ///
    /// Used by mutations outside the state machine (assignee changes) so
    /// that concurrent transitions racing the mutation still fail their
    /// version check.
    pub fn invalidate(&mut self) {
        self.version += 1;
    }

    const fn guard(
        &self,
        item: WorkItemId,
        action: WorkItemAction,
    ) -> Result<(), WorkItemDomainError> {
        if self.status.accepts(action) {
            Ok(())
        } else {
            Err(WorkItemDomainError::InvalidTransition {
                item,
                from: self.status,
                action,
            })
        }
    }

    fn bump(&mut self, clock: &impl Clock) {
        self.version += 1;
        self.updated_at = clock.utc();
    }
}

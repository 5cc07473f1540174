//! Repository port for task and subtask persistence.

use crate::assignment::domain::AssignmentId;
use crate::workitem::domain::{Subtask, SubtaskId, Task, TaskId, WorkItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work-item repository operations.
pub type WorkItemRepositoryResult<T> = Result<T, WorkItemRepositoryError>;

/// Task and subtask persistence contract.
///
/// Updates carry the version the caller read; implementations must reject
/// the write with [`WorkItemRepositoryError::StaleVersion`] when the
/// stored stamp differs, so concurrent transitions on one item resolve
/// deterministically instead of last-writer-wins.
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::AssignmentMissing`] when the
    /// anchoring assignment is not stored,
    /// [`WorkItemRepositoryError::AssignmentRetired`] when it is no longer
    /// active, [`WorkItemRepositoryError::AssignmentBeingDeleted`] when a
    /// cascade holds it, or [`WorkItemRepositoryError::Duplicate`] when the
    /// task ID already exists.
    async fn insert_task(&self, task: &Task) -> WorkItemRepositoryResult<()>;

    /// Stores a new subtask.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::ParentTaskMissing`] when the
    /// parent task is not stored, or
    /// [`WorkItemRepositoryError::Duplicate`] when the subtask ID already
    /// exists.
    async fn insert_subtask(&self, subtask: &Subtask) -> WorkItemRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> WorkItemRepositoryResult<Option<Task>>;

    /// Finds a subtask by identifier.
    ///
    /// Returns `None` when the subtask does not exist.
    async fn find_subtask(&self, id: SubtaskId) -> WorkItemRepositoryResult<Option<Subtask>>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the task does not
    /// exist, or [`WorkItemRepositoryError::StaleVersion`] when the stored
    /// stamp differs from `expected_version`.
    async fn update_task(&self, task: &Task, expected_version: u64)
    -> WorkItemRepositoryResult<()>;

    /// Persists changes to an existing subtask.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the subtask does
    /// not exist, or [`WorkItemRepositoryError::StaleVersion`] when the
    /// stored stamp differs from `expected_version`.
    async fn update_subtask(
        &self,
        subtask: &Subtask,
        expected_version: u64,
    ) -> WorkItemRepositoryResult<()>;

    /// Returns every task anchored to the given assignment.
    async fn tasks_for_assignment(
        &self,
        assignment: AssignmentId,
    ) -> WorkItemRepositoryResult<Vec<Task>>;

    /// Returns every subtask under the given task.
    async fn subtasks_for_task(&self, task: TaskId) -> WorkItemRepositoryResult<Vec<Subtask>>;
}

/// Errors returned by work-item repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkItemRepositoryError {
    /// A work item with the same identifier already exists.
    #[error("duplicate work item identifier: {0}")]
    Duplicate(WorkItemId),

    /// The work item was not found.
    #[error("work item not found: {0}")]
    NotFound(WorkItemId),

    /// The stored version stamp differs from the one the caller read.
    /// The caller must re-read and retry.
    #[error("stale version for {item}: expected {expected}, stored {actual}")]
    StaleVersion {
        /// The contended work item.
        item: WorkItemId,
        /// The stamp the caller read.
        expected: u64,
        /// The stamp currently stored.
        actual: u64,
    },

    /// The anchoring assignment is not stored.
    #[error("assignment not found: {0}")]
    AssignmentMissing(AssignmentId),

    /// The anchoring assignment has been retired.
    #[error("assignment {0} is retired")]
    AssignmentRetired(AssignmentId),

    /// The anchoring assignment is being removed by a cascade.
    #[error("assignment {0} is being deleted")]
    AssignmentBeingDeleted(AssignmentId),

    /// The parent task is not stored.
    #[error("parent task not found: {0}")]
    ParentTaskMissing(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkItemRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

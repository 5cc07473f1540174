//! Identifier types for the work-item domain.

use crate::directory::domain::entity_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

entity_id! {
    /// Unique identifier for a task record.
    TaskId
}

entity_id! {
    /// Unique identifier for a subtask record.
    SubtaskId
}

/// Identifier of either work-item kind, used by the shared lifecycle
/// operations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum WorkItemId {
    /// A task identifier.
    Task(TaskId),
    /// A subtask identifier.
    Subtask(SubtaskId),
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task {id}"),
            Self::Subtask(id) => write!(f, "subtask {id}"),
        }
    }
}

impl From<TaskId> for WorkItemId {
    fn from(id: TaskId) -> Self {
        Self::Task(id)
    }
}

impl From<SubtaskId> for WorkItemId {
    fn from(id: SubtaskId) -> Self {
        Self::Subtask(id)
    }
}

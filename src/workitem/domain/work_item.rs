//! Unified view over the two work-item kinds.

use super::{Subtask, Task, WorkItemId, WorkItemLifecycle, WorkItemStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task or subtask, as returned by the shared lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkItem {
    /// A task.
    Task(Task),
    /// A subtask.
    Subtask(Subtask),
}

impl WorkItem {
    /// Returns the work-item identifier.
    #[must_use]
    pub const fn id(&self) -> WorkItemId {
        match self {
            Self::Task(task) => task.work_item_id(),
            Self::Subtask(subtask) => subtask.work_item_id(),
        }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> &WorkItemLifecycle {
        match self {
            Self::Task(task) => task.lifecycle(),
            Self::Subtask(subtask) => subtask.lifecycle(),
        }
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> WorkItemStatus {
        self.lifecycle().status()
    }

    /// Returns the optimistic version stamp.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.lifecycle().version()
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        match self {
            Self::Task(task) => task.deadline(),
            Self::Subtask(subtask) => subtask.deadline(),
        }
    }

    /// Returns whether the deadline has passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline() < now
    }

    /// Returns the contained task, if this is one.
    #[must_use]
    pub const fn as_task(&self) -> Option<&Task> {
        match self {
            Self::Task(task) => Some(task),
            Self::Subtask(_) => None,
        }
    }

    /// Returns the contained subtask, if this is one.
    #[must_use]
    pub const fn as_subtask(&self) -> Option<&Subtask> {
        match self {
            Self::Task(_) => None,
            Self::Subtask(subtask) => Some(subtask),
        }
    }
}

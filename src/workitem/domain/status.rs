//! Work-item status lifecycle shared by tasks and subtasks.

use super::ParseWorkItemStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task or subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    /// Created, no submission yet. Reachable only at creation.
    Pending,
    /// An assignee has submitted implementation evidence.
    InProgress,
    /// A reviewer approved the submitted work.
    Completed,
    /// A reviewer rejected submitted work and attached feedback. Behaves
    /// like a second pending state but stays visually distinct so the
    /// assignee can see the item was previously rejected.
    ReAssigned,
}

/// Lifecycle operation attempted against a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemAction {
    /// An assignee submits implementation evidence.
    Submit,
    /// A reviewer accepts the submitted work.
    Approve,
    /// A reviewer rejects the submitted work with feedback.
    Reject,
}

impl WorkItemStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::ReAssigned => "re_assigned",
        }
    }

    /// Returns whether the given action is legal from this status.
    ///
    /// The legal edges are: Submit from `Pending`, `Re Assigned`, or
    /// `In Progress` (a repeated submission overwrites the previous one);
    /// Approve from `In Progress`; Reject from `In Progress` or
    /// `Completed` (a reviewer may reopen completed work). Nothing returns
    /// an item to `Pending`.
    #[must_use]
    pub const fn accepts(self, action: WorkItemAction) -> bool {
        match action {
            WorkItemAction::Submit => matches!(
                self,
                Self::Pending | Self::InProgress | Self::ReAssigned
            ),
            WorkItemAction::Approve => matches!(self, Self::InProgress),
            WorkItemAction::Reject => matches!(self, Self::InProgress | Self::Completed),
        }
    }
}

impl TryFrom<&str> for WorkItemStatus {
    type Error = ParseWorkItemStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "re_assigned" => Ok(Self::ReAssigned),
            _ => Err(ParseWorkItemStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for WorkItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkItemAction {
    /// Returns the canonical name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for WorkItemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

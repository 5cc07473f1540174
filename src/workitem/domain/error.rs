//! Error types for work-item domain validation and parsing.

use super::{WorkItemAction, WorkItemId, WorkItemStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning work items.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkItemDomainError {
    /// The attempted action is not legal from the item's current status.
    #[error("cannot {action} {item}: status is {from}")]
    InvalidTransition {
        /// The targeted work item.
        item: WorkItemId,
        /// The status the item held when the action was attempted.
        from: WorkItemStatus,
        /// The attempted action.
        action: WorkItemAction,
    },

    /// A submission must carry a non-empty repository URL.
    #[error("submission URL must not be empty")]
    MissingSubmissionUrl,

    /// A rejection must carry non-empty feedback.
    #[error("rejection feedback must not be empty")]
    MissingFeedback,

    /// The work-item title is empty after trimming.
    #[error("work item title must not be empty")]
    EmptyTitle,

    /// A subtask must be assigned to at least one member.
    #[error("subtask must be assigned to at least one team member")]
    EmptyAssigneeSet,
}

/// Error returned while parsing work-item statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown work item status: {0}")]
pub struct ParseWorkItemStatusError(pub String);

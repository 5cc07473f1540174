//! Domain model for tasks, subtasks, and their shared lifecycle.

mod error;
mod ids;
mod lifecycle;
mod status;
mod submission;
mod subtask;
mod task;
mod work_item;

pub use error::{ParseWorkItemStatusError, WorkItemDomainError};
pub use ids::{SubtaskId, TaskId, WorkItemId};
pub use lifecycle::{PersistedLifecycleData, WorkItemLifecycle};
pub use status::{WorkItemAction, WorkItemStatus};
pub use submission::{Feedback, GitHubUrl, Submission};
pub use subtask::{PersistedSubtaskData, Subtask};
pub use task::{PersistedTaskData, Task};
pub use work_item::WorkItem;

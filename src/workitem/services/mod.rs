//! Orchestration services for the work-item module.

mod hierarchy;
mod lifecycle;

pub use hierarchy::{
    CreateSubtaskRequest, CreateTaskRequest, WorkItemHierarchyError, WorkItemHierarchyResult,
    WorkItemHierarchyService,
};
pub use lifecycle::{
    ReviewDecision, ReviewRequest, SubmitRequest, WorkItemLifecycleError, WorkItemLifecycleResult,
    WorkItemLifecycleService,
};

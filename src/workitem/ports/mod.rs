//! Port contracts for the work-item module.

mod hierarchy;
mod repository;

pub use hierarchy::{HierarchyError, HierarchyResolver, HierarchyResult, TeamContext};
pub use repository::{WorkItemRepository, WorkItemRepositoryError, WorkItemRepositoryResult};

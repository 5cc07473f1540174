//! Domain model for projects and project assignments.

mod assignment;
mod error;
mod ids;
mod project;

pub use assignment::{PersistedAssignmentData, ProjectAssignment};
pub use error::{AssignmentDomainError, ParseProjectStatusError};
pub use ids::{AssignmentId, ProjectId};
pub use project::{PersistedProjectData, Project, ProjectStatus};

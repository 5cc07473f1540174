//! Port contracts for the assignment module.

mod repository;

pub use repository::{
    AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult,
    ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
};

//! Port contracts for the directory module.

mod identity;
mod repository;

pub use identity::{CallerResolver, IdentityError, IdentityResult};
pub use repository::{
    DirectoryRepositoryError, DirectoryRepositoryResult, TeamRepository, UserRepository,
};

//! Repository ports for user and team persistence.

use crate::directory::domain::{Team, TeamId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateUser`] when the user ID
    /// already exists.
    async fn insert(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>>;
}

/// Team persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateTeam`] when the team ID
    /// already exists, or [`DirectoryRepositoryError::UnknownParticipant`]
    /// when a roster references a user that is not stored.
    async fn insert(&self, team: &Team) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing team (rosters, name, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::TeamNotFound`] when the team does
    /// not exist, or [`DirectoryRepositoryError::UnknownParticipant`] when a
    /// roster references a user that is not stored.
    async fn update(&self, team: &Team) -> DirectoryRepositoryResult<()>;

    /// Finds a team by identifier.
    ///
    /// Returns `None` when the team does not exist.
    async fn find(&self, id: TeamId) -> DirectoryRepositoryResult<Option<Team>>;

    /// Returns all teams owned by the given project manager.
    async fn created_by(&self, manager: UserId) -> DirectoryRepositoryResult<Vec<Team>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// The team was not found.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// A team roster references a user that is not stored.
    #[error("team roster references unknown user: {0}")]
    UnknownParticipant(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

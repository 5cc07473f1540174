//! Service layer for user and team provisioning.

use crate::directory::{
    domain::{Caller, DirectoryDomainError, Role, RoleSet, Team, TeamId, TeamName, User, UserId},
    ports::{DirectoryRepositoryError, TeamRepository, UserRepository},
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    name: String,
    leader_ids: BTreeSet<UserId>,
    member_ids: BTreeSet<UserId>,
}

impl CreateTeamRequest {
    /// Creates a request with the team name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leader_ids: BTreeSet::new(),
            member_ids: BTreeSet::new(),
        }
    }

    /// Sets the leader roster.
    #[must_use]
    pub fn with_leaders(mut self, leaders: impl IntoIterator<Item = UserId>) -> Self {
        self.leader_ids = leaders.into_iter().collect();
        self
    }

    /// Sets the member roster.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.member_ids = members.into_iter().collect();
        self
    }
}

/// Service-level errors for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),

    /// The caller lacks the capability required for the operation.
    #[error("user {user} is not authorized to perform this operation")]
    NotAuthorized {
        /// The acting user.
        user: UserId,
    },

    /// The caller does not own the targeted team.
    #[error("user {user} does not own team {team}")]
    NotTeamOwner {
        /// The targeted team.
        team: TeamId,
        /// The acting user.
        user: UserId,
    },

    /// A roster user does not hold the role its roster requires.
    #[error("user {user} does not hold role {role}")]
    MissingRole {
        /// The referenced user.
        user: UserId,
        /// The role the roster requires.
        role: Role,
    },
}

/// Result type for provisioning service operations.
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

/// User and team provisioning orchestration service.
#[derive(Clone)]
pub struct ProvisioningService<U, T, C>
where
    U: UserRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    teams: Arc<T>,
    clock: Arc<C>,
}

impl<U, T, C> ProvisioningService<U, T, C>
where
    U: UserRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new provisioning service.
    #[must_use]
    pub const fn new(users: Arc<U>, teams: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            teams,
            clock,
        }
    }

    /// Provisions a new user. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::NotAuthorized`] when the caller is not
    /// an administrator, [`ProvisioningError::Domain`] when the role set is
    /// invalid, or [`ProvisioningError::Repository`] when persistence fails.
    pub async fn create_user(
        &self,
        caller: &Caller,
        roles: impl IntoIterator<Item = Role> + Send,
    ) -> ProvisioningResult<User> {
        if !caller.is_admin() {
            return Err(ProvisioningError::NotAuthorized {
                user: caller.user_id(),
            });
        }
        let role_set = RoleSet::new(roles)?;
        let user = User::new(role_set, Some(caller.user_id()), &*self.clock);
        self.users.insert(&user).await?;
        Ok(user)
    }

    /// Creates a team owned by the calling project manager.
    ///
    /// Every roster id must reference a stored user holding the matching
    /// role (`TeamLeader` for leaders, `TeamMember` for members).
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::NotAuthorized`] when the caller is not a
    /// project manager, [`ProvisioningError::MissingRole`] when a roster
    /// user lacks the required capability, or the underlying domain or
    /// repository error otherwise.
    pub async fn create_team(
        &self,
        caller: &Caller,
        request: CreateTeamRequest,
    ) -> ProvisioningResult<Team> {
        if !caller.is_project_manager() {
            return Err(ProvisioningError::NotAuthorized {
                user: caller.user_id(),
            });
        }
        let name = TeamName::new(request.name)?;
        for leader in &request.leader_ids {
            self.require_role(*leader, Role::TeamLeader).await?;
        }
        for member in &request.member_ids {
            self.require_role(*member, Role::TeamMember).await?;
        }

        let team = Team::new(
            name,
            request.leader_ids,
            request.member_ids,
            caller.user_id(),
            &*self.clock,
        );
        self.teams.insert(&team).await?;
        Ok(team)
    }

    /// Adds a user to a team's member roster.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::NotTeamOwner`] when the caller neither
    /// owns the team nor is an administrator, or the underlying role or
    /// repository error otherwise.
    pub async fn add_member(
        &self,
        caller: &Caller,
        team_id: TeamId,
        user: UserId,
    ) -> ProvisioningResult<Team> {
        let mut team = self.owned_team(caller, team_id).await?;
        self.require_role(user, Role::TeamMember).await?;
        team.add_member(user, &*self.clock);
        self.teams.update(&team).await?;
        Ok(team)
    }

    /// Adds a user to a team's leader roster.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::NotTeamOwner`] when the caller neither
    /// owns the team nor is an administrator, or the underlying role or
    /// repository error otherwise.
    pub async fn add_leader(
        &self,
        caller: &Caller,
        team_id: TeamId,
        user: UserId,
    ) -> ProvisioningResult<Team> {
        let mut team = self.owned_team(caller, team_id).await?;
        self.require_role(user, Role::TeamLeader).await?;
        team.add_leader(user, &*self.clock);
        self.teams.update(&team).await?;
        Ok(team)
    }

    /// Finds a user by identifier.
    ///
    /// Returns `Ok(None)` when no user has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_user(&self, id: UserId) -> ProvisioningResult<Option<User>> {
        Ok(self.users.find(id).await?)
    }

    /// Finds a team by identifier.
    ///
    /// Returns `Ok(None)` when no team has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_team(&self, id: TeamId) -> ProvisioningResult<Option<Team>> {
        Ok(self.teams.find(id).await?)
    }

    async fn owned_team(&self, caller: &Caller, team_id: TeamId) -> ProvisioningResult<Team> {
        let team = self
            .teams
            .find(team_id)
            .await?
            .ok_or(DirectoryRepositoryError::TeamNotFound(team_id))?;
        if !caller.is_admin() && team.created_by() != caller.user_id() {
            return Err(ProvisioningError::NotTeamOwner {
                team: team_id,
                user: caller.user_id(),
            });
        }
        Ok(team)
    }

    async fn require_role(&self, user: UserId, role: Role) -> ProvisioningResult<()> {
        let stored = self
            .users
            .find(user)
            .await?
            .ok_or(DirectoryRepositoryError::UserNotFound(user))?;
        if !stored.roles().contains(role) {
            return Err(ProvisioningError::MissingRole { user, role });
        }
        Ok(())
    }
}

//! Directory port implementations.

use super::{InMemoryStore, StoreState};
use crate::directory::domain::{Team, TeamId, User, UserId};
use crate::directory::ports::{
    DirectoryRepositoryError, DirectoryRepositoryResult, TeamRepository, UserRepository,
};
use async_trait::async_trait;

fn check_rosters(state: &StoreState, team: &Team) -> DirectoryRepositoryResult<()> {
    for user in team.leader_ids().iter().chain(team.member_ids()) {
        if !state.users.contains_key(user) {
            return Err(DirectoryRepositoryError::UnknownParticipant(*user));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write().map_err(DirectoryRepositoryError::persistence)?;
        if state.users.contains_key(&user.id()) {
            return Err(DirectoryRepositoryError::DuplicateUser(user.id()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>> {
        let state = self.read().map_err(DirectoryRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn insert(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let mut state = self.write().map_err(DirectoryRepositoryError::persistence)?;
        if state.teams.contains_key(&team.id()) {
            return Err(DirectoryRepositoryError::DuplicateTeam(team.id()));
        }
        check_rosters(&state, team)?;
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn update(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let mut state = self.write().map_err(DirectoryRepositoryError::persistence)?;
        if !state.teams.contains_key(&team.id()) {
            return Err(DirectoryRepositoryError::TeamNotFound(team.id()));
        }
        check_rosters(&state, team)?;
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find(&self, id: TeamId) -> DirectoryRepositoryResult<Option<Team>> {
        let state = self.read().map_err(DirectoryRepositoryError::persistence)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn created_by(&self, manager: UserId) -> DirectoryRepositoryResult<Vec<Team>> {
        let state = self.read().map_err(DirectoryRepositoryError::persistence)?;
        let mut teams: Vec<Team> = state
            .teams
            .values()
            .filter(|team| team.created_by() == manager)
            .cloned()
            .collect();
        teams.sort_by_key(Team::id);
        Ok(teams)
    }
}

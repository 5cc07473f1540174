//! Team aggregate root and its membership rosters.

use super::{DirectoryDomainError, TeamId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Validated, non-empty team name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a validated team name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyTeamName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyTeamName);
        }
        Ok(Self(trimmed))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TeamName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team aggregate root.
///
/// A team is exclusively owned by the project manager who created it.
/// Leaders need not appear in the member roster; both rosters must
/// reference live users, which the store enforces on insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: TeamName,
    leader_ids: BTreeSet<UserId>,
    member_ids: BTreeSet<UserId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted team aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted team name.
    pub name: TeamName,
    /// Persisted leader roster.
    pub leader_ids: BTreeSet<UserId>,
    /// Persisted member roster.
    pub member_ids: BTreeSet<UserId>,
    /// Owning project manager.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team owned by the given project manager.
    #[must_use]
    pub fn new(
        name: TeamName,
        leader_ids: BTreeSet<UserId>,
        member_ids: BTreeSet<UserId>,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TeamId::new(),
            name,
            leader_ids,
            member_ids,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            leader_ids: data.leader_ids,
            member_ids: data.member_ids,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the leader roster.
    #[must_use]
    pub const fn leader_ids(&self) -> &BTreeSet<UserId> {
        &self.leader_ids
    }

    /// Returns the member roster.
    #[must_use]
    pub const fn member_ids(&self) -> &BTreeSet<UserId> {
        &self.member_ids
    }

    /// Returns the owning project manager.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the user leads this team.
    #[must_use]
    pub fn is_leader(&self, user: UserId) -> bool {
        self.leader_ids.contains(&user)
    }

    /// Returns whether the user appears in the member roster.
    #[must_use]
    pub fn has_member(&self, user: UserId) -> bool {
        self.member_ids.contains(&user)
    }

    /// Returns whether either roster references the user.
    #[must_use]
    pub fn references(&self, user: UserId) -> bool {
        self.is_leader(user) || self.has_member(user)
    }

    /// Adds a user to the member roster. Idempotent.
    pub fn add_member(&mut self, user: UserId, clock: &impl Clock) {
        if self.member_ids.insert(user) {
            self.touch(clock);
        }
    }

    /// Adds a user to the leader roster. Idempotent.
    pub fn add_leader(&mut self, user: UserId, clock: &impl Clock) {
        if self.leader_ids.insert(user) {
            self.touch(clock);
        }
    }

    /// Removes the user from both rosters without any cascading effect.
    ///
    /// Returns `true` when either roster referenced the user. Used by the
    /// cascade engine when a team participant is deleted.
    pub fn unassign(&mut self, user: UserId) -> bool {
        let led = self.leader_ids.remove(&user);
        let member = self.member_ids.remove(&user);
        led || member
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

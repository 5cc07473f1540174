//! Closure computation, authorization, and atomic execution.

use crate::assignment::domain::{Project, ProjectAssignment, ProjectId};
use crate::cascade::{
    domain::{CascadeResult, DeletionClosure, DeletionRoot},
    ports::{CascadeStore, CascadeStoreError},
};
use crate::directory::domain::{Caller, Team, TeamId, UserId};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for cascading deletions.
#[derive(Debug, Error)]
pub enum CascadeError {
    /// The deletion root does not exist.
    #[error("{root} not found")]
    NotFound {
        /// The requested root.
        root: DeletionRoot,
    },

    /// The caller may not delete the root.
    #[error("user {user} may not delete {root}")]
    NotAuthorized {
        /// The requested root.
        root: DeletionRoot,
        /// The acting user.
        user: UserId,
    },

    /// Store read or commit failed.
    #[error(transparent)]
    Store(#[from] CascadeStoreError),
}

/// Result type for cascade engine operations.
pub type CascadeEngineResult<T> = Result<T, CascadeError>;

/// One root that a bulk deletion could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    /// The root that failed.
    pub root: DeletionRoot,
    /// Why it failed.
    pub reason: String,
}

/// Outcome of a bulk deletion: each root succeeds or fails on its own.
#[derive(Debug, Clone, Default)]
pub struct BulkCascadeOutcome {
    /// Cascades that committed, in request order.
    pub succeeded: Vec<CascadeResult>,
    /// Roots that did not commit, in request order.
    pub failed: Vec<BulkFailure>,
}

/// The cascading deletion engine.
///
/// Every deletion runs in three phases: compute the full closure from the
/// root, authorize the caller against the root, and hand the closure to
/// the store for an all-or-nothing commit. Nothing is removed while the
/// closure is still being computed.
#[derive(Clone)]
pub struct CascadeEngine<S>
where
    S: CascadeStore,
{
    store: Arc<S>,
}

impl<S> CascadeEngine<S>
where
    S: CascadeStore,
{
    /// Creates a new engine over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Deletes a user and everything the user's removal implies.
    ///
    /// Only administrators delete users. A project manager's teams and
    /// projects leave with them, including every assignment, task, and
    /// subtask underneath. A participant's record is removed and every
    /// surviving roster and subtask assignee set drops the reference;
    /// subtasks whose assignee set becomes empty stay alive and keep
    /// their status.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::NotAuthorized`] when the caller is not an
    /// administrator, [`CascadeError::NotFound`] when the user does not
    /// exist, or [`CascadeError::Store`] when a read or the commit fails.
    pub async fn delete_user(
        &self,
        caller: &Caller,
        user: UserId,
    ) -> CascadeEngineResult<CascadeResult> {
        let root = DeletionRoot::User(user);
        if !caller.is_admin() {
            return Err(CascadeError::NotAuthorized {
                root,
                user: caller.user_id(),
            });
        }
        let closure = self.user_closure(user).await?;
        self.store.execute(&closure).await?;
        Ok(closure.into())
    }

    /// Deletes several users, isolating each root's outcome.
    ///
    /// Each user is processed as an independent cascade: one root failing
    /// (unknown ID, commit error) never rolls back or blocks the others.
    /// The outcome lists committed cascades and failed roots in request
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::NotAuthorized`] when the caller is not an
    /// administrator; per-root failures are reported in the outcome, not
    /// as an error.
    pub async fn delete_users(
        &self,
        caller: &Caller,
        users: impl IntoIterator<Item = UserId> + Send,
    ) -> CascadeEngineResult<BulkCascadeOutcome> {
        let mut outcome = BulkCascadeOutcome::default();
        for user in users {
            match self.delete_user(caller, user).await {
                Ok(result) => outcome.succeeded.push(result),
                Err(err @ CascadeError::NotAuthorized { .. }) => return Err(err),
                Err(err) => outcome.failed.push(BulkFailure {
                    root: DeletionRoot::User(user),
                    reason: err.to_string(),
                }),
            }
        }
        Ok(outcome)
    }

    /// Deletes a team and the work anchored to it.
    ///
    /// The team's assignments leave with it, along with every task and
    /// subtask underneath. Assigned projects survive and become eligible
    /// for re-assignment; team participants survive as users.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::NotFound`] when the team does not exist,
    /// [`CascadeError::NotAuthorized`] when the caller is neither an
    /// administrator nor the owning project manager, or
    /// [`CascadeError::Store`] when a read or the commit fails.
    pub async fn delete_team(
        &self,
        caller: &Caller,
        team: TeamId,
    ) -> CascadeEngineResult<CascadeResult> {
        let root = DeletionRoot::Team(team);
        let found = self
            .store
            .find_team(team)
            .await?
            .ok_or(CascadeError::NotFound { root })?;
        if !(caller.is_admin() || found.created_by() == caller.user_id()) {
            return Err(CascadeError::NotAuthorized {
                root,
                user: caller.user_id(),
            });
        }

        let mut closure = DeletionClosure::new(root);
        self.expand_team(&mut closure, &found).await?;
        self.store.execute(&closure).await?;
        Ok(closure.into())
    }

    /// Deletes a project and the work anchored to it.
    ///
    /// The project's assignments leave with it, along with every task and
    /// subtask underneath. The assigned team survives untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::NotFound`] when the project does not exist,
    /// [`CascadeError::NotAuthorized`] when the caller is neither an
    /// administrator nor the owning project manager, or
    /// [`CascadeError::Store`] when a read or the commit fails.
    pub async fn delete_project(
        &self,
        caller: &Caller,
        project: ProjectId,
    ) -> CascadeEngineResult<CascadeResult> {
        let root = DeletionRoot::Project(project);
        let found = self
            .store
            .find_project(project)
            .await?
            .ok_or(CascadeError::NotFound { root })?;
        if !(caller.is_admin() || found.created_by() == caller.user_id()) {
            return Err(CascadeError::NotAuthorized {
                root,
                user: caller.user_id(),
            });
        }

        let mut closure = DeletionClosure::new(root);
        self.expand_project(&mut closure, &found).await?;
        self.store.execute(&closure).await?;
        Ok(closure.into())
    }

    async fn user_closure(&self, user: UserId) -> CascadeEngineResult<DeletionClosure> {
        let root = DeletionRoot::User(user);
        let found = self
            .store
            .find_user(user)
            .await?
            .ok_or(CascadeError::NotFound { root })?;

        let mut closure = DeletionClosure::new(root);
        closure.record_user(user);

        // A project manager's owned graph leaves with them.
        if found.roles().is_project_manager() {
            for team in self.store.teams_created_by(user).await? {
                self.expand_team(&mut closure, &team).await?;
            }
            for project in self.store.projects_created_by(user).await? {
                self.expand_project(&mut closure, &project).await?;
            }
        }

        // Scrub surviving references to the participant. Rosters and
        // assignee sets already inside the deletion closure vanish
        // anyway and are skipped.
        closure.record_participant(user);
        for team in self.store.teams_referencing(user).await? {
            if !closure.deletes_team(team.id()) {
                closure.record_team_unassignment(team.id());
            }
        }
        for subtask in self.store.subtasks_assigned_to(user).await? {
            if !closure.deletes_subtask(subtask.id()) {
                closure.record_subtask_unassignment(subtask.id());
            }
        }

        Ok(closure)
    }

    async fn expand_team(
        &self,
        closure: &mut DeletionClosure,
        team: &Team,
    ) -> CascadeEngineResult<()> {
        if !closure.record_team(team.id()) {
            return Ok(());
        }
        let assignments = self.store.assignments_for_team(team.id()).await?;
        self.expand_assignments(closure, &assignments).await
    }

    async fn expand_project(
        &self,
        closure: &mut DeletionClosure,
        project: &Project,
    ) -> CascadeEngineResult<()> {
        if !closure.record_project(project.id()) {
            return Ok(());
        }
        let assignments = self.store.assignments_for_project(project.id()).await?;
        self.expand_assignments(closure, &assignments).await
    }

    async fn expand_assignments(
        &self,
        closure: &mut DeletionClosure,
        assignments: &[ProjectAssignment],
    ) -> CascadeEngineResult<()> {
        for assignment in assignments {
            if !closure.record_assignment(assignment.id()) {
                continue;
            }
            for task in self.store.tasks_for_assignment(assignment.id()).await? {
                if !closure.record_task(task.id()) {
                    continue;
                }
                for subtask in self.store.subtasks_for_task(task.id()).await? {
                    closure.record_subtask(subtask.id());
                }
            }
        }
        Ok(())
    }
}

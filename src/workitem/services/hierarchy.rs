//! Service layer for creating work items under the assignment hierarchy.

use crate::assignment::domain::AssignmentId;
use crate::directory::domain::{Caller, TeamId, UserId};
use crate::workitem::{
    domain::{Subtask, SubtaskId, Task, TaskId, WorkItemDomainError, WorkItemId},
    ports::{
        HierarchyError, HierarchyResolver, TeamContext, WorkItemRepository,
        WorkItemRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    assignment_id: AssignmentId,
    title: String,
    description: String,
    deadline: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(
        assignment_id: AssignmentId,
        title: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            assignment_id,
            title: title.into(),
            description: String::new(),
            deadline,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for creating a subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubtaskRequest {
    task_id: TaskId,
    title: String,
    description: String,
    assigned_to: BTreeSet<UserId>,
    deadline: DateTime<Utc>,
}

impl CreateSubtaskRequest {
    /// Creates a request with required subtask fields.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            task_id,
            title: title.into(),
            description: String::new(),
            assigned_to: BTreeSet::new(),
            deadline,
        }
    }

    /// Sets the subtask description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the assignee set.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_to = assignees.into_iter().collect();
        self
    }
}

/// Service-level errors for work-item creation and reassignment.
#[derive(Debug, Error)]
pub enum WorkItemHierarchyError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkItemDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkItemRepositoryError),

    /// Hierarchy resolution failed.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// The caller may not create work under the assignment.
    #[error("user {user} may not manage work under assignment {assignment}")]
    NotAuthorized {
        /// The anchoring assignment.
        assignment: AssignmentId,
        /// The acting user.
        user: UserId,
    },

    /// The assignment has been retired; no new tasks may anchor to it.
    #[error("assignment {0} is retired")]
    AssignmentRetired(AssignmentId),

    /// An assignee is not in the team's member roster.
    #[error("assignee {user} is not a member of team {team}")]
    AssigneeNotInTeam {
        /// The assigned team.
        team: TeamId,
        /// The offending user.
        user: UserId,
    },
}

/// Result type for work-item hierarchy operations.
pub type WorkItemHierarchyResult<T> = Result<T, WorkItemHierarchyError>;

/// Work-item creation and reassignment orchestration service.
///
/// Enforces the creation-order invariants: a task cannot exist without a
/// live project assignment, a subtask cannot exist without a parent task,
/// and subtask assignees must come from the assigned team's member roster.
#[derive(Clone)]
pub struct WorkItemHierarchyService<R, H, C>
where
    R: WorkItemRepository,
    H: HierarchyResolver,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hierarchy: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> WorkItemHierarchyService<R, H, C>
where
    R: WorkItemRepository,
    H: HierarchyResolver,
    C: Clock + Send + Sync,
{
    /// Creates a new hierarchy service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hierarchy: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hierarchy,
            clock,
        }
    }

    /// Creates a task under an active assignment.
    ///
    /// The caller must lead the assigned team, own the project, or be an
    /// administrator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemHierarchyError::AssignmentRetired`] when the
    /// assignment is no longer active,
    /// [`WorkItemHierarchyError::NotAuthorized`] when the caller lacks the
    /// required relation, or the underlying domain, hierarchy, or
    /// repository error otherwise.
    pub async fn create_task(
        &self,
        caller: &Caller,
        request: CreateTaskRequest,
    ) -> WorkItemHierarchyResult<Task> {
        let context = self
            .hierarchy
            .context_for_assignment(request.assignment_id)
            .await?;
        Self::authorize_management(caller, &context)?;
        if !context.assignment_active {
            return Err(WorkItemHierarchyError::AssignmentRetired(
                request.assignment_id,
            ));
        }

        let task = Task::new(
            request.assignment_id,
            request.title,
            request.description,
            request.deadline,
            &*self.clock,
        )?;
        self.repository.insert_task(&task).await?;
        Ok(task)
    }

    /// Creates a subtask under an existing task, assigned to team members.
    ///
    /// The caller must lead the assigned team, own the project, or be an
    /// administrator. Every assignee must appear in the team's member
    /// roster.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemHierarchyError::AssigneeNotInTeam`] when an
    /// assignee is outside the roster,
    /// [`WorkItemDomainError::EmptyAssigneeSet`] (wrapped) when no assignee
    /// is given, or the underlying hierarchy or repository error otherwise.
    pub async fn create_subtask(
        &self,
        caller: &Caller,
        request: CreateSubtaskRequest,
    ) -> WorkItemHierarchyResult<Subtask> {
        let task = self.find_task_or_error(request.task_id).await?;
        let context = self
            .hierarchy
            .context_for_assignment(task.assignment_id())
            .await?;
        Self::authorize_management(caller, &context)?;
        Self::check_assignees(&context, &request.assigned_to)?;

        let subtask = Subtask::new(
            request.task_id,
            request.title,
            request.description,
            request.assigned_to,
            request.deadline,
            &*self.clock,
        )?;
        self.repository.insert_subtask(&subtask).await?;
        Ok(subtask)
    }

    /// Replaces a subtask's assignee set.
    ///
    /// This is the manual path back for subtasks whose assignee set was
    /// emptied by a participant deletion. The caller must lead the
    /// assigned team, own the project, or be an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemHierarchyError::AssigneeNotInTeam`] when an
    /// assignee is outside the roster, or the underlying domain,
    /// hierarchy, or repository error otherwise.
    pub async fn reassign_subtask(
        &self,
        caller: &Caller,
        subtask_id: SubtaskId,
        assigned_to: BTreeSet<UserId>,
    ) -> WorkItemHierarchyResult<Subtask> {
        let mut subtask = self.find_subtask_or_error(subtask_id).await?;
        let task = self.find_task_or_error(subtask.parent_task_id()).await?;
        let context = self
            .hierarchy
            .context_for_assignment(task.assignment_id())
            .await?;
        Self::authorize_management(caller, &context)?;
        Self::check_assignees(&context, &assigned_to)?;

        let expected = subtask.version();
        subtask.reassign(assigned_to)?;
        self.repository.update_subtask(&subtask, expected).await?;
        Ok(subtask)
    }

    /// Returns every task anchored to the given assignment.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemHierarchyError::Repository`] when persistence
    /// lookup fails.
    pub async fn tasks_for_assignment(
        &self,
        assignment: AssignmentId,
    ) -> WorkItemHierarchyResult<Vec<Task>> {
        Ok(self.repository.tasks_for_assignment(assignment).await?)
    }

    /// Returns every subtask under the given task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemHierarchyError::Repository`] when persistence
    /// lookup fails.
    pub async fn subtasks_for_task(&self, task: TaskId) -> WorkItemHierarchyResult<Vec<Subtask>> {
        Ok(self.repository.subtasks_for_task(task).await?)
    }

    fn authorize_management(caller: &Caller, context: &TeamContext) -> WorkItemHierarchyResult<()> {
        let user = caller.user_id();
        let allowed = caller.is_admin()
            || context.project_owner == user
            || context.leader_ids.contains(&user);
        if allowed {
            Ok(())
        } else {
            Err(WorkItemHierarchyError::NotAuthorized {
                assignment: context.assignment_id,
                user,
            })
        }
    }

    fn check_assignees(
        context: &TeamContext,
        assigned_to: &BTreeSet<UserId>,
    ) -> WorkItemHierarchyResult<()> {
        for user in assigned_to {
            if !context.member_ids.contains(user) {
                return Err(WorkItemHierarchyError::AssigneeNotInTeam {
                    team: context.team_id,
                    user: *user,
                });
            }
        }
        Ok(())
    }

    async fn find_task_or_error(&self, id: TaskId) -> WorkItemHierarchyResult<Task> {
        self.repository
            .find_task(id)
            .await?
            .ok_or_else(|| WorkItemRepositoryError::NotFound(WorkItemId::Task(id)).into())
    }

    async fn find_subtask_or_error(&self, id: SubtaskId) -> WorkItemHierarchyResult<Subtask> {
        self.repository
            .find_subtask(id)
            .await?
            .ok_or_else(|| WorkItemRepositoryError::NotFound(WorkItemId::Subtask(id)).into())
    }
}

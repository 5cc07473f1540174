//! Service layer for work-item submission and review.

use crate::assignment::domain::AssignmentId;
use crate::directory::domain::UserId;
use crate::workitem::{
    domain::{
        Feedback, GitHubUrl, Submission, WorkItem, WorkItemDomainError, WorkItemId,
    },
    ports::{
        HierarchyError, HierarchyResolver, TeamContext, WorkItemRepository,
        WorkItemRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for submitting implementation evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    item: WorkItemId,
    submitter: UserId,
    github_url: String,
    context: Option<String>,
}

impl SubmitRequest {
    /// Creates a request with required submission fields.
    #[must_use]
    pub fn new(
        item: impl Into<WorkItemId>,
        submitter: UserId,
        github_url: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            submitter,
            github_url: github_url.into(),
            context: None,
        }
    }

    /// Sets the implementation explanation.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Reviewer verdict on submitted work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Accept the work; the item completes.
    Approve,
    /// Send the work back; mandatory feedback accompanies the rejection.
    Reject,
}

/// Request payload for reviewing submitted work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    item: WorkItemId,
    reviewer: UserId,
    decision: ReviewDecision,
    feedback: Option<String>,
}

impl ReviewRequest {
    /// Creates an approval request.
    #[must_use]
    pub fn approve(item: impl Into<WorkItemId>, reviewer: UserId) -> Self {
        Self {
            item: item.into(),
            reviewer,
            decision: ReviewDecision::Approve,
            feedback: None,
        }
    }

    /// Creates a rejection request with feedback.
    #[must_use]
    pub fn reject(
        item: impl Into<WorkItemId>,
        reviewer: UserId,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            reviewer,
            decision: ReviewDecision::Reject,
            feedback: Some(feedback.into()),
        }
    }

    /// Creates a rejection request without feedback.
    ///
    /// The engine rejects such a request with
    /// [`WorkItemDomainError::MissingFeedback`]; this constructor exists
    /// for callers that forward presentation-layer input verbatim.
    #[must_use]
    pub fn reject_without_feedback(item: impl Into<WorkItemId>, reviewer: UserId) -> Self {
        Self {
            item: item.into(),
            reviewer,
            decision: ReviewDecision::Reject,
            feedback: None,
        }
    }
}

/// Service-level errors for lifecycle operations.
#[derive(Debug, Error)]
pub enum WorkItemLifecycleError {
    /// Domain validation or transition guard failed.
    #[error(transparent)]
    Domain(#[from] WorkItemDomainError),

    /// Repository operation failed (includes stale-version conflicts).
    #[error(transparent)]
    Repository(#[from] WorkItemRepositoryError),

    /// Hierarchy resolution failed.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// The submitter is not in the item's assignee set.
    #[error("user {user} is not an assignee of {item}")]
    NotAssignee {
        /// The targeted work item.
        item: WorkItemId,
        /// The acting user.
        user: UserId,
    },

    /// The reviewer holds no review relation to the item.
    #[error("user {user} may not review {item}")]
    NotReviewer {
        /// The targeted work item.
        item: WorkItemId,
        /// The acting user.
        user: UserId,
    },
}

/// Result type for lifecycle service operations.
pub type WorkItemLifecycleResult<T> = Result<T, WorkItemLifecycleError>;

/// Work-item submission and review orchestration service.
///
/// Every operation loads the item, checks authorization against the
/// freshly resolved team context, applies the domain transition, and
/// persists with the version stamp it read. A concurrent winner on the
/// same item surfaces as a stale-version repository error for retry;
/// nothing is ever resolved last-writer-wins.
#[derive(Clone)]
pub struct WorkItemLifecycleService<R, H, C>
where
    R: WorkItemRepository,
    H: HierarchyResolver,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hierarchy: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> WorkItemLifecycleService<R, H, C>
where
    R: WorkItemRepository,
    H: HierarchyResolver,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hierarchy: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hierarchy,
            clock,
        }
    }

    /// Submits implementation evidence for a work item.
    ///
    /// Task evidence is submitted by a leader of the assigned team;
    /// subtask evidence by one of the subtask's assignees. A second
    /// submission while `In Progress` overwrites the previous evidence.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError::NotAssignee`] when the submitter
    /// lacks the required relation,
    /// [`WorkItemDomainError::MissingSubmissionUrl`] (wrapped) when the
    /// URL is empty, [`WorkItemDomainError::InvalidTransition`] (wrapped)
    /// when the status forbids submission, or the underlying repository
    /// error (including stale-version conflicts) otherwise.
    pub async fn submit(&self, request: SubmitRequest) -> WorkItemLifecycleResult<WorkItem> {
        let url = GitHubUrl::new(request.github_url)?;
        let submission = Submission::new(request.submitter, url, request.context);

        match request.item {
            WorkItemId::Task(id) => {
                let mut task = self
                    .repository
                    .find_task(id)
                    .await?
                    .ok_or(WorkItemRepositoryError::NotFound(request.item))?;
                let context = self.context_for(task.assignment_id()).await?;
                if !context.may_submit_task(request.submitter) {
                    return Err(WorkItemLifecycleError::NotAssignee {
                        item: request.item,
                        user: request.submitter,
                    });
                }
                let expected = task.version();
                task.submit(submission, &*self.clock)?;
                self.repository.update_task(&task, expected).await?;
                Ok(WorkItem::Task(task))
            }
            WorkItemId::Subtask(id) => {
                let mut subtask = self
                    .repository
                    .find_subtask(id)
                    .await?
                    .ok_or(WorkItemRepositoryError::NotFound(request.item))?;
                if !subtask.is_assignee(request.submitter) {
                    return Err(WorkItemLifecycleError::NotAssignee {
                        item: request.item,
                        user: request.submitter,
                    });
                }
                let expected = subtask.version();
                subtask.submit(submission, &*self.clock)?;
                self.repository.update_subtask(&subtask, expected).await?;
                Ok(WorkItem::Subtask(subtask))
            }
        }
    }

    /// Reviews submitted work, approving or rejecting it.
    ///
    /// Task work is reviewed by a leader of the assigned team or the
    /// owning project manager; subtask work by a team leader. A rejection
    /// requires non-empty feedback, which overwrites the submission's
    /// context field. Completed work may be rejected to reopen it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError::NotReviewer`] when the reviewer
    /// lacks the required relation,
    /// [`WorkItemDomainError::MissingFeedback`] (wrapped) when a rejection
    /// carries no feedback, [`WorkItemDomainError::InvalidTransition`]
    /// (wrapped) when the status forbids the verdict, or the underlying
    /// repository error (including stale-version conflicts) otherwise.
    pub async fn review(&self, request: ReviewRequest) -> WorkItemLifecycleResult<WorkItem> {
        let feedback = match request.decision {
            ReviewDecision::Approve => None,
            ReviewDecision::Reject => {
                Some(Feedback::new(request.feedback.unwrap_or_default())?)
            }
        };

        match request.item {
            WorkItemId::Task(id) => {
                let mut task = self
                    .repository
                    .find_task(id)
                    .await?
                    .ok_or(WorkItemRepositoryError::NotFound(request.item))?;
                let context = self.context_for(task.assignment_id()).await?;
                if !context.may_review_task(request.reviewer) {
                    return Err(WorkItemLifecycleError::NotReviewer {
                        item: request.item,
                        user: request.reviewer,
                    });
                }
                let expected = task.version();
                match feedback {
                    None => task.approve(&*self.clock)?,
                    Some(reason) => task.reject(reason, &*self.clock)?,
                }
                self.repository.update_task(&task, expected).await?;
                Ok(WorkItem::Task(task))
            }
            WorkItemId::Subtask(id) => {
                let mut subtask = self
                    .repository
                    .find_subtask(id)
                    .await?
                    .ok_or(WorkItemRepositoryError::NotFound(request.item))?;
                let parent = self
                    .repository
                    .find_task(subtask.parent_task_id())
                    .await?
                    .ok_or(WorkItemRepositoryError::ParentTaskMissing(
                        subtask.parent_task_id(),
                    ))?;
                let context = self.context_for(parent.assignment_id()).await?;
                if !context.may_review_subtask(request.reviewer) {
                    return Err(WorkItemLifecycleError::NotReviewer {
                        item: request.item,
                        user: request.reviewer,
                    });
                }
                let expected = subtask.version();
                match feedback {
                    None => subtask.approve(&*self.clock)?,
                    Some(reason) => subtask.reject(reason, &*self.clock)?,
                }
                self.repository.update_subtask(&subtask, expected).await?;
                Ok(WorkItem::Subtask(subtask))
            }
        }
    }

    /// Finds a work item by identifier.
    ///
    /// Returns `Ok(None)` when no item has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError::Repository`] when persistence
    /// lookup fails.
    pub async fn find(&self, item: WorkItemId) -> WorkItemLifecycleResult<Option<WorkItem>> {
        let found = match item {
            WorkItemId::Task(id) => self.repository.find_task(id).await?.map(WorkItem::Task),
            WorkItemId::Subtask(id) => self
                .repository
                .find_subtask(id)
                .await?
                .map(WorkItem::Subtask),
        };
        Ok(found)
    }

    async fn context_for(
        &self,
        assignment: AssignmentId,
    ) -> WorkItemLifecycleResult<TeamContext> {
        Ok(self.hierarchy.context_for_assignment(assignment).await?)
    }
}

//! Unit tests for task and subtask lifecycle behaviour.

use crate::assignment::domain::AssignmentId;
use crate::directory::domain::UserId;
use crate::workitem::domain::{
    Feedback, GitHubUrl, Submission, Subtask, Task, TaskId, WorkItemAction, WorkItemDomainError,
    WorkItemStatus,
};
use chrono::{Duration, Utc};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::collections::BTreeSet;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn pending_task(clock: DefaultClock) -> Result<Task, WorkItemDomainError> {
    Task::new(
        AssignmentId::new(),
        "Implement ingestion",
        "Parse and store the feed",
        Utc::now() + Duration::days(7),
        &clock,
    )
}

fn submission(submitter: UserId, url: &str) -> Result<Submission, WorkItemDomainError> {
    Ok(Submission::new(
        submitter,
        GitHubUrl::new(url)?,
        Some("first pass".to_owned()),
    ))
}

#[rstest]
fn task_rejects_empty_title(clock: DefaultClock) {
    let result = Task::new(
        AssignmentId::new(),
        "  ",
        "",
        Utc::now() + Duration::days(7),
        &clock,
    );
    assert!(matches!(result, Err(WorkItemDomainError::EmptyTitle)));
}

#[rstest]
fn submit_moves_pending_task_in_progress(
    clock: DefaultClock,
    pending_task: Result<Task, WorkItemDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    let submitter = UserId::new();
    ensure!(task.status() == WorkItemStatus::Pending);
    ensure!(task.version() == 0);

    task.submit(submission(submitter, "https://github.com/acme/feed/pull/1")?, &clock)?;

    ensure!(task.status() == WorkItemStatus::InProgress);
    ensure!(task.version() == 1);
    let recorded = task.lifecycle().submission();
    ensure!(recorded.is_some_and(|s| s.submitted_by() == submitter));
    Ok(())
}

#[rstest]
fn repeated_submission_overwrites_evidence(
    clock: DefaultClock,
    pending_task: Result<Task, WorkItemDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    let submitter = UserId::new();
    task.submit(submission(submitter, "https://github.com/acme/feed/pull/1")?, &clock)?;
    task.submit(submission(submitter, "https://github.com/acme/feed/pull/2")?, &clock)?;

    ensure!(task.status() == WorkItemStatus::InProgress);
    ensure!(task.version() == 2);
    let url = task
        .lifecycle()
        .submission()
        .map(|s| s.github_url().as_str().to_owned());
    ensure!(url.as_deref() == Some("https://github.com/acme/feed/pull/2"));
    Ok(())
}

#[rstest]
fn approve_requires_in_progress(
    clock: DefaultClock,
    pending_task: Result<Task, WorkItemDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    let result = task.approve(&clock);
    let expected = Err(WorkItemDomainError::InvalidTransition {
        item: task.work_item_id(),
        from: WorkItemStatus::Pending,
        action: WorkItemAction::Approve,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == WorkItemStatus::Pending);
    ensure!(task.version() == 0);
    Ok(())
}

#[rstest]
fn reject_overwrites_context_with_feedback(
    clock: DefaultClock,
    pending_task: Result<Task, WorkItemDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    task.submit(
        submission(UserId::new(), "https://github.com/acme/feed/pull/1")?,
        &clock,
    )?;

    task.reject(Feedback::new("needs integration tests")?, &clock)?;

    ensure!(task.status() == WorkItemStatus::ReAssigned);
    let context = task
        .lifecycle()
        .submission()
        .and_then(|s| s.context().map(str::to_owned));
    ensure!(context.as_deref() == Some("needs integration tests"));
    Ok(())
}

#[rstest]
fn rejected_task_accepts_resubmission_and_approval(
    clock: DefaultClock,
    pending_task: Result<Task, WorkItemDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    let submitter = UserId::new();
    task.submit(submission(submitter, "https://github.com/acme/feed/pull/1")?, &clock)?;
    task.reject(Feedback::new("needs integration tests")?, &clock)?;

    task.submit(submission(submitter, "https://github.com/acme/feed/pull/3")?, &clock)?;
    ensure!(task.status() == WorkItemStatus::InProgress);

    task.approve(&clock)?;
    ensure!(task.status() == WorkItemStatus::Completed);
    Ok(())
}

#[rstest]
fn completed_task_may_be_reopened_by_rejection(
    clock: DefaultClock,
    pending_task: Result<Task, WorkItemDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    task.submit(
        submission(UserId::new(), "https://github.com/acme/feed/pull/1")?,
        &clock,
    )?;
    task.approve(&clock)?;

    task.reject(Feedback::new("regression found after approval")?, &clock)?;
    ensure!(task.status() == WorkItemStatus::ReAssigned);
    Ok(())
}

#[rstest]
fn feedback_rejects_empty_value() {
    assert!(matches!(
        Feedback::new("  "),
        Err(WorkItemDomainError::MissingFeedback)
    ));
}

#[rstest]
fn github_url_rejects_empty_value() {
    assert!(matches!(
        GitHubUrl::new(""),
        Err(WorkItemDomainError::MissingSubmissionUrl)
    ));
}

#[rstest]
fn subtask_requires_non_empty_assignee_set(clock: DefaultClock) {
    let result = Subtask::new(
        TaskId::new(),
        "Write parser",
        "",
        BTreeSet::new(),
        Utc::now() + Duration::days(3),
        &clock,
    );
    assert!(matches!(result, Err(WorkItemDomainError::EmptyAssigneeSet)));
}

#[rstest]
fn reassign_rejects_empty_replacement_set(clock: DefaultClock) -> eyre::Result<()> {
    let assignee = UserId::new();
    let mut subtask = Subtask::new(
        TaskId::new(),
        "Write parser",
        "",
        BTreeSet::from([assignee]),
        Utc::now() + Duration::days(3),
        &clock,
    )?;

    let result = subtask.reassign(BTreeSet::new());
    ensure!(matches!(result, Err(WorkItemDomainError::EmptyAssigneeSet)));
    ensure!(subtask.is_assignee(assignee));
    Ok(())
}

#[rstest]
fn unassign_may_empty_the_set_without_killing_the_subtask(
    clock: DefaultClock,
) -> eyre::Result<()> {
    let assignee = UserId::new();
    let mut subtask = Subtask::new(
        TaskId::new(),
        "Write parser",
        "",
        BTreeSet::from([assignee]),
        Utc::now() + Duration::days(3),
        &clock,
    )?;
    subtask.submit(
        Submission::new(
            assignee,
            GitHubUrl::new("https://github.com/acme/feed/pull/9")?,
            None,
        ),
        &clock,
    )?;
    let version_before = subtask.version();

    ensure!(subtask.unassign(assignee));
    ensure!(subtask.assigned_to().is_empty());
    ensure!(subtask.status() == WorkItemStatus::InProgress);
    ensure!(subtask.version() == version_before + 1);
    ensure!(!subtask.unassign(assignee));
    Ok(())
}

#[rstest]
fn overdue_is_informational(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::new(
        AssignmentId::new(),
        "Implement ingestion",
        "",
        Utc::now() - Duration::days(1),
        &clock,
    )?;
    ensure!(task.is_overdue(Utc::now()));
    ensure!(task.status() == WorkItemStatus::Pending);
    Ok(())
}

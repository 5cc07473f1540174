//! Service orchestration tests for work-item creation, submission, and
//! review.

use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment};
use crate::assignment::ports::{AssignmentRepository, ProjectRepository};
use crate::directory::domain::{Caller, Role, RoleSet, Team, TeamName, User, UserId};
use crate::directory::ports::{TeamRepository, UserRepository};
use crate::store::InMemoryStore;
use crate::workitem::{
    domain::{Subtask, Task, WorkItemDomainError, WorkItemStatus},
    ports::{WorkItemRepository, WorkItemRepositoryError},
    services::{
        CreateSubtaskRequest, CreateTaskRequest, ReviewRequest, SubmitRequest,
        WorkItemHierarchyError, WorkItemHierarchyService, WorkItemLifecycleError,
        WorkItemLifecycleService,
    },
};
use chrono::{DateTime, Duration, Utc};
use eyre::{bail, ensure, OptionExt};
use mockable::DefaultClock;
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::Arc;

type HierarchyService = WorkItemHierarchyService<InMemoryStore, InMemoryStore, DefaultClock>;
type LifecycleService = WorkItemLifecycleService<InMemoryStore, InMemoryStore, DefaultClock>;

struct World {
    store: Arc<InMemoryStore>,
    hierarchy: HierarchyService,
    lifecycle: LifecycleService,
    manager: Caller,
    leader: Caller,
    member: Caller,
    assignment_id: AssignmentId,
}

fn deadline() -> DateTime<Utc> {
    Utc::now() + Duration::days(7)
}

async fn world() -> eyre::Result<World> {
    let clock = DefaultClock;
    let store = Arc::new(InMemoryStore::new());

    let manager = User::new(RoleSet::single(Role::ProjectManager), None, &clock);
    let leader = User::new(RoleSet::single(Role::TeamLeader), None, &clock);
    let member = User::new(RoleSet::single(Role::TeamMember), None, &clock);
    for user in [&manager, &leader, &member] {
        UserRepository::insert(store.as_ref(), user).await?;
    }

    let team = Team::new(
        TeamName::new("Platform")?,
        BTreeSet::from([leader.id()]),
        BTreeSet::from([member.id()]),
        manager.id(),
        &clock,
    );
    TeamRepository::insert(store.as_ref(), &team).await?;

    let project = Project::new("Rollout", "", manager.id(), &clock)?;
    ProjectRepository::insert(store.as_ref(), &project).await?;

    let assignment =
        ProjectAssignment::new(project.id(), team.id(), manager.id(), deadline(), &clock);
    AssignmentRepository::insert(store.as_ref(), &assignment).await?;

    let hierarchy = WorkItemHierarchyService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(DefaultClock),
    );
    let lifecycle = WorkItemLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(DefaultClock),
    );

    Ok(World {
        store,
        hierarchy,
        lifecycle,
        manager: manager.as_caller(),
        leader: leader.as_caller(),
        member: member.as_caller(),
        assignment_id: assignment.id(),
    })
}

async fn seed_task(world: &World) -> eyre::Result<Task> {
    let request = CreateTaskRequest::new(world.assignment_id, "Implement ingestion", deadline());
    Ok(world.hierarchy.create_task(&world.leader, request).await?)
}

async fn seed_subtask(world: &World, task: &Task) -> eyre::Result<Subtask> {
    let request = CreateSubtaskRequest::new(task.id(), "Write parser", deadline())
        .with_assignees([world.member.user_id()]);
    Ok(world
        .hierarchy
        .create_subtask(&world.leader, request)
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leader_creates_task_under_active_assignment() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;

    ensure!(task.status() == WorkItemStatus::Pending);
    let listed = world
        .hierarchy
        .tasks_for_assignment(world.assignment_id)
        .await?;
    ensure!(listed == vec![task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_may_not_create_tasks() -> eyre::Result<()> {
    let world = world().await?;
    let request = CreateTaskRequest::new(world.assignment_id, "Implement ingestion", deadline());
    let result = world.hierarchy.create_task(&world.member, request).await;

    let Err(WorkItemHierarchyError::NotAuthorized { assignment, user }) = result else {
        bail!("expected authorization failure, got {result:?}");
    };
    ensure!(assignment == world.assignment_id);
    ensure!(user == world.member.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retired_assignment_accepts_no_new_tasks() -> eyre::Result<()> {
    let world = world().await?;
    let clock = DefaultClock;
    let mut assignment = AssignmentRepository::find(world.store.as_ref(), world.assignment_id)
        .await?
        .ok_or_eyre("assignment should be stored")?;
    assignment.retire(&clock)?;
    AssignmentRepository::update(world.store.as_ref(), &assignment).await?;

    let request = CreateTaskRequest::new(world.assignment_id, "Implement ingestion", deadline());
    let result = world.hierarchy.create_task(&world.leader, request).await;
    ensure!(matches!(
        result,
        Err(WorkItemHierarchyError::AssignmentRetired(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_assignees_must_be_team_members() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;

    let outsider = UserId::new();
    let request = CreateSubtaskRequest::new(task.id(), "Write parser", deadline())
        .with_assignees([outsider]);
    let result = world.hierarchy.create_subtask(&world.leader, request).await;

    let Err(WorkItemHierarchyError::AssigneeNotInTeam { user, .. }) = result else {
        bail!("expected roster failure, got {result:?}");
    };
    ensure!(user == outsider);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_submits_and_leader_reviews_subtask() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;
    let subtask = seed_subtask(&world, &task).await?;

    let submit = SubmitRequest::new(
        subtask.id(),
        world.member.user_id(),
        "https://github.com/acme/feed/pull/4",
    )
    .with_context("parser with fixtures");
    let submitted = world.lifecycle.submit(submit).await?;
    ensure!(submitted.status() == WorkItemStatus::InProgress);

    let approved = world
        .lifecycle
        .review(ReviewRequest::approve(subtask.id(), world.leader.user_id()))
        .await?;
    ensure!(approved.status() == WorkItemStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_assignee_may_not_submit_subtask_work() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;
    let subtask = seed_subtask(&world, &task).await?;

    let submit = SubmitRequest::new(
        subtask.id(),
        world.leader.user_id(),
        "https://github.com/acme/feed/pull/4",
    );
    let result = world.lifecycle.submit(submit).await;

    let Err(WorkItemLifecycleError::NotAssignee { user, .. }) = result else {
        bail!("expected assignee failure, got {result:?}");
    };
    ensure!(user == world.leader.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_may_not_review_subtask_work() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;
    let subtask = seed_subtask(&world, &task).await?;
    world
        .lifecycle
        .submit(SubmitRequest::new(
            subtask.id(),
            world.member.user_id(),
            "https://github.com/acme/feed/pull/4",
        ))
        .await?;

    let result = world
        .lifecycle
        .review(ReviewRequest::approve(subtask.id(), world.member.user_id()))
        .await;
    ensure!(matches!(
        result,
        Err(WorkItemLifecycleError::NotReviewer { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_without_feedback_is_refused() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;
    let subtask = seed_subtask(&world, &task).await?;
    world
        .lifecycle
        .submit(SubmitRequest::new(
            subtask.id(),
            world.member.user_id(),
            "https://github.com/acme/feed/pull/4",
        ))
        .await?;

    let request =
        ReviewRequest::reject_without_feedback(subtask.id(), world.leader.user_id());
    let result = world.lifecycle.review(request).await;
    ensure!(matches!(
        result,
        Err(WorkItemLifecycleError::Domain(
            WorkItemDomainError::MissingFeedback
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_owner_may_review_task_work() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;

    world
        .lifecycle
        .submit(SubmitRequest::new(
            task.id(),
            world.leader.user_id(),
            "https://github.com/acme/feed/pull/5",
        ))
        .await?;
    let rejected = world
        .lifecycle
        .review(ReviewRequest::reject(
            task.id(),
            world.manager.user_id(),
            "missing rollout plan",
        ))
        .await?;

    ensure!(rejected.status() == WorkItemStatus::ReAssigned);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_mutation_surfaces_stale_version() -> eyre::Result<()> {
    let world = world().await?;
    let task = seed_task(&world).await?;
    let subtask = seed_subtask(&world, &task).await?;

    // Reassignment bumps the stored stamp; a write carrying the stamp
    // read beforehand must lose.
    let stale_version = subtask.version();
    world
        .hierarchy
        .reassign_subtask(
            &world.leader,
            subtask.id(),
            BTreeSet::from([world.member.user_id()]),
        )
        .await?;

    let result = world
        .store
        .update_subtask(&subtask, stale_version)
        .await;
    let Err(WorkItemRepositoryError::StaleVersion { expected, actual, .. }) = result else {
        bail!("expected stale-version failure, got {result:?}");
    };
    ensure!(expected == stale_version);
    ensure!(actual == stale_version + 1);
    Ok(())
}

//! Cascading deletion tests covering closure shape, survivors, and
//! authorization.

use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment, ProjectId};
use crate::assignment::ports::{AssignmentRepository, ProjectRepository};
use crate::cascade::{
    domain::{DeletionClosure, DeletionRoot},
    ports::{CascadeStore, CascadeStoreError, CascadeStoreResult},
    services::{CascadeEngine, CascadeError},
};
use crate::directory::domain::{Caller, Role, RoleSet, Team, TeamId, TeamName, User, UserId};
use crate::directory::ports::{TeamRepository, UserRepository};
use crate::store::InMemoryStore;
use crate::workitem::domain::{Subtask, SubtaskId, Task, TaskId, WorkItemStatus};
use crate::workitem::ports::WorkItemRepository;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use eyre::{bail, ensure, OptionExt};
use mockable::DefaultClock;
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct World {
    store: Arc<InMemoryStore>,
    engine: CascadeEngine<InMemoryStore>,
    admin: Caller,
    manager: Caller,
    manager_id: UserId,
    leader_id: UserId,
    member_id: UserId,
    second_member_id: UserId,
    team_id: TeamId,
    project_id: ProjectId,
    assignment_id: AssignmentId,
    solo_subtask_id: SubtaskId,
    shared_subtask_id: SubtaskId,
}

fn deadline() -> DateTime<Utc> {
    Utc::now() + Duration::days(7)
}

/// Seeds one manager-owned team and project with an assignment, a task,
/// and two subtasks: one assigned to `member` alone, one shared between
/// both members.
async fn world() -> eyre::Result<World> {
    let clock = DefaultClock;
    let store = Arc::new(InMemoryStore::new());

    let admin_user = User::new(RoleSet::single(Role::Admin), None, &clock);
    let manager = User::new(RoleSet::single(Role::ProjectManager), None, &clock);
    let leader = User::new(RoleSet::single(Role::TeamLeader), None, &clock);
    let member = User::new(RoleSet::single(Role::TeamMember), None, &clock);
    let second_member = User::new(RoleSet::single(Role::TeamMember), None, &clock);
    for user in [&admin_user, &manager, &leader, &member, &second_member] {
        UserRepository::insert(store.as_ref(), user).await?;
    }

    let team = Team::new(
        TeamName::new("Platform")?,
        BTreeSet::from([leader.id()]),
        BTreeSet::from([member.id(), second_member.id()]),
        manager.id(),
        &clock,
    );
    TeamRepository::insert(store.as_ref(), &team).await?;

    let project = Project::new("Rollout", "", manager.id(), &clock)?;
    ProjectRepository::insert(store.as_ref(), &project).await?;

    let assignment =
        ProjectAssignment::new(project.id(), team.id(), manager.id(), deadline(), &clock);
    AssignmentRepository::insert(store.as_ref(), &assignment).await?;

    let task = Task::new(assignment.id(), "Implement ingestion", "", deadline(), &clock)?;
    store.insert_task(&task).await?;

    let solo = Subtask::new(
        task.id(),
        "Write parser",
        "",
        BTreeSet::from([member.id()]),
        deadline(),
        &clock,
    )?;
    let shared = Subtask::new(
        task.id(),
        "Write fixtures",
        "",
        BTreeSet::from([member.id(), second_member.id()]),
        deadline(),
        &clock,
    )?;
    store.insert_subtask(&solo).await?;
    store.insert_subtask(&shared).await?;

    let engine = CascadeEngine::new(Arc::clone(&store));
    Ok(World {
        engine,
        admin: admin_user.as_caller(),
        manager: manager.as_caller(),
        manager_id: manager.id(),
        leader_id: leader.id(),
        member_id: member.id(),
        second_member_id: second_member.id(),
        team_id: team.id(),
        project_id: project.id(),
        assignment_id: assignment.id(),
        solo_subtask_id: solo.id(),
        shared_subtask_id: shared.id(),
        store,
    })
}

/// Store wrapper that inserts a task the first time the engine reads
/// tasks for an assignment, so the insertion lands after closure
/// expansion but before the commit.
struct LateInsertStore {
    inner: Arc<InMemoryStore>,
    late_task: Task,
    injected: AtomicBool,
}

#[async_trait]
impl CascadeStore for LateInsertStore {
    async fn find_user(&self, id: UserId) -> CascadeStoreResult<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn find_team(&self, id: TeamId) -> CascadeStoreResult<Option<Team>> {
        self.inner.find_team(id).await
    }

    async fn find_project(&self, id: ProjectId) -> CascadeStoreResult<Option<Project>> {
        self.inner.find_project(id).await
    }

    async fn teams_created_by(&self, manager: UserId) -> CascadeStoreResult<Vec<Team>> {
        self.inner.teams_created_by(manager).await
    }

    async fn projects_created_by(&self, manager: UserId) -> CascadeStoreResult<Vec<Project>> {
        self.inner.projects_created_by(manager).await
    }

    async fn teams_referencing(&self, user: UserId) -> CascadeStoreResult<Vec<Team>> {
        self.inner.teams_referencing(user).await
    }

    async fn subtasks_assigned_to(&self, user: UserId) -> CascadeStoreResult<Vec<Subtask>> {
        self.inner.subtasks_assigned_to(user).await
    }

    async fn assignments_for_project(
        &self,
        project: ProjectId,
    ) -> CascadeStoreResult<Vec<ProjectAssignment>> {
        self.inner.assignments_for_project(project).await
    }

    async fn assignments_for_team(
        &self,
        team: TeamId,
    ) -> CascadeStoreResult<Vec<ProjectAssignment>> {
        self.inner.assignments_for_team(team).await
    }

    async fn tasks_for_assignment(
        &self,
        assignment: AssignmentId,
    ) -> CascadeStoreResult<Vec<Task>> {
        let tasks = CascadeStore::tasks_for_assignment(self.inner.as_ref(), assignment).await?;
        if !self.injected.swap(true, Ordering::SeqCst) {
            self.inner
                .insert_task(&self.late_task)
                .await
                .map_err(CascadeStoreError::persistence)?;
        }
        Ok(tasks)
    }

    async fn subtasks_for_task(&self, task: TaskId) -> CascadeStoreResult<Vec<Subtask>> {
        CascadeStore::subtasks_for_task(self.inner.as_ref(), task).await
    }

    async fn execute(&self, closure: &DeletionClosure) -> CascadeStoreResult<()> {
        self.inner.execute(closure).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_participant_scrubs_references_only() -> eyre::Result<()> {
    let world = world().await?;

    let result = world.engine.delete_user(&world.admin, world.member_id).await?;

    ensure!(result.removed_count() == 1);
    ensure!(result.removed_users() == &BTreeSet::from([world.member_id]));
    ensure!(result.unassigned_teams().contains(&world.team_id));
    ensure!(result.unassigned_subtasks().contains(&world.solo_subtask_id));
    ensure!(result.unassigned_subtasks().contains(&world.shared_subtask_id));

    let team = TeamRepository::find(world.store.as_ref(), world.team_id)
        .await?
        .ok_or_eyre("team should survive")?;
    ensure!(!team.references(world.member_id));
    ensure!(team.has_member(world.second_member_id));

    // The emptied subtask survives with its status intact.
    let solo = world
        .store
        .find_subtask(world.solo_subtask_id)
        .await?
        .ok_or_eyre("subtask should survive")?;
    ensure!(solo.assigned_to().is_empty());
    ensure!(solo.status() == WorkItemStatus::Pending);

    let shared = world
        .store
        .find_subtask(world.shared_subtask_id)
        .await?
        .ok_or_eyre("subtask should survive")?;
    ensure!(shared.assigned_to() == &BTreeSet::from([world.second_member_id]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_team_spares_projects_and_users() -> eyre::Result<()> {
    let world = world().await?;

    let result = world.engine.delete_team(&world.manager, world.team_id).await?;

    ensure!(result.root() == DeletionRoot::Team(world.team_id));
    ensure!(result.removed_teams() == &BTreeSet::from([world.team_id]));
    ensure!(result.removed_assignments().len() == 1);
    ensure!(result.removed_tasks().len() == 1);
    ensure!(result.removed_subtasks().len() == 2);
    ensure!(result.removed_projects().is_empty());
    ensure!(result.removed_users().is_empty());
    ensure!(result.removed_count() == 5);

    ensure!(TeamRepository::find(world.store.as_ref(), world.team_id)
        .await?
        .is_none());
    ensure!(ProjectRepository::find(world.store.as_ref(), world.project_id)
        .await?
        .is_some());
    ensure!(UserRepository::find(world.store.as_ref(), world.leader_id)
        .await?
        .is_some());

    // The project's active slot is free again.
    ensure!(
        AssignmentRepository::active_for_project(world.store.as_ref(), world.project_id)
            .await?
            .is_none()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_spares_the_team() -> eyre::Result<()> {
    let world = world().await?;

    let result = world
        .engine
        .delete_project(&world.manager, world.project_id)
        .await?;

    ensure!(result.removed_projects() == &BTreeSet::from([world.project_id]));
    ensure!(result.removed_count() == 5);
    ensure!(ProjectRepository::find(world.store.as_ref(), world.project_id)
        .await?
        .is_none());
    ensure!(TeamRepository::find(world.store.as_ref(), world.team_id)
        .await?
        .is_some());
    ensure!(world.store.find_subtask(world.solo_subtask_id).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_manager_takes_the_owned_graph() -> eyre::Result<()> {
    let world = world().await?;

    let result = world
        .engine
        .delete_user(&world.admin, world.manager_id)
        .await?;

    ensure!(result.removed_users() == &BTreeSet::from([world.manager_id]));
    ensure!(result.removed_teams() == &BTreeSet::from([world.team_id]));
    ensure!(result.removed_projects() == &BTreeSet::from([world.project_id]));
    ensure!(result.removed_assignments().len() == 1);
    ensure!(result.removed_tasks().len() == 1);
    ensure!(result.removed_subtasks().len() == 2);
    ensure!(result.removed_count() == 7);

    ensure!(UserRepository::find(world.store.as_ref(), world.manager_id)
        .await?
        .is_none());
    ensure!(UserRepository::find(world.store.as_ref(), world.member_id)
        .await?
        .is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_administrators_delete_users() -> eyre::Result<()> {
    let world = world().await?;

    let result = world.engine.delete_user(&world.manager, world.member_id).await;
    let Err(CascadeError::NotAuthorized { root, user }) = result else {
        bail!("expected authorization failure, got an unexpected outcome");
    };
    ensure!(root == DeletionRoot::User(world.member_id));
    ensure!(user == world.manager.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_deletion_requires_owner_or_administrator() -> eyre::Result<()> {
    let world = world().await?;
    let stranger = Caller::new(UserId::new(), RoleSet::single(Role::ProjectManager));

    let result = world.engine.delete_team(&stranger, world.team_id).await;
    ensure!(matches!(result, Err(CascadeError::NotAuthorized { .. })));

    world.engine.delete_team(&world.admin, world.team_id).await?;
    ensure!(TeamRepository::find(world.store.as_ref(), world.team_id)
        .await?
        .is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_root_reports_not_found() -> eyre::Result<()> {
    let world = world().await?;
    let ghost = ProjectId::new();

    let result = world.engine.delete_project(&world.admin, ghost).await;
    let Err(CascadeError::NotFound { root }) = result else {
        bail!("expected not-found failure, got an unexpected outcome");
    };
    ensure!(root == DeletionRoot::Project(ghost));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_created_during_deletion_leaves_with_its_assignment() -> eyre::Result<()> {
    let world = world().await?;
    let late_task = Task::new(
        world.assignment_id,
        "Late arrival",
        "",
        deadline(),
        &DefaultClock,
    )?;
    let racing = Arc::new(LateInsertStore {
        inner: Arc::clone(&world.store),
        late_task: late_task.clone(),
        injected: AtomicBool::new(false),
    });
    let engine = CascadeEngine::new(racing);

    let result = engine.delete_team(&world.admin, world.team_id).await?;

    // The task landed after the closure was computed, so the audit
    // listing never saw it.
    ensure!(!result.removed_tasks().contains(&late_task.id()));
    // The commit swept it out with its assignment regardless.
    ensure!(world.store.find_task(late_task.id()).await?.is_none());
    ensure!(world.store.find_subtask(world.solo_subtask_id).await?.is_none());
    ensure!(TeamRepository::find(world.store.as_ref(), world.team_id)
        .await?
        .is_none());
    ensure!(
        AssignmentRepository::find(world.store.as_ref(), world.assignment_id)
            .await?
            .is_none()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_deletion_isolates_failing_roots() -> eyre::Result<()> {
    let world = world().await?;
    let ghost = UserId::new();

    let outcome = world
        .engine
        .delete_users(
            &world.admin,
            [world.member_id, ghost, world.second_member_id],
        )
        .await?;

    ensure!(outcome.succeeded.len() == 2);
    ensure!(outcome.failed.len() == 1);
    let failure = outcome.failed.first().ok_or_eyre("one failure expected")?;
    ensure!(failure.root == DeletionRoot::User(ghost));
    ensure!(failure.reason.contains("not found"));

    ensure!(UserRepository::find(world.store.as_ref(), world.member_id)
        .await?
        .is_none());
    ensure!(UserRepository::find(world.store.as_ref(), world.second_member_id)
        .await?
        .is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_deletion_requires_administrator() -> eyre::Result<()> {
    let world = world().await?;

    let result = world
        .engine
        .delete_users(&world.manager, [world.member_id])
        .await;
    ensure!(matches!(result, Err(CascadeError::NotAuthorized { .. })));
    ensure!(UserRepository::find(world.store.as_ref(), world.member_id)
        .await?
        .is_some());
    Ok(())
}

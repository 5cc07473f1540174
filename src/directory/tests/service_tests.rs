//! Service orchestration tests for user and team provisioning.

use crate::directory::{
    domain::{Caller, Role, RoleSet, UserId},
    ports::DirectoryRepositoryError,
    services::{CreateTeamRequest, ProvisioningError, ProvisioningService},
};
use crate::store::InMemoryStore;
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService = ProvisioningService<InMemoryStore, InMemoryStore, DefaultClock>;

#[fixture]
fn service() -> TestService {
    let store = Arc::new(InMemoryStore::new());
    ProvisioningService::new(Arc::clone(&store), store, Arc::new(DefaultClock))
}

fn admin() -> Caller {
    Caller::new(UserId::new(), RoleSet::single(Role::Admin))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_persists_and_is_retrievable(service: TestService) -> eyre::Result<()> {
    let admin = admin();
    let user = service.create_user(&admin, [Role::TeamMember]).await?;

    ensure!(user.created_by() == Some(admin.user_id()));
    let fetched = service.find_user(user.id()).await?;
    ensure!(fetched == Some(user));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_requires_administrator(service: TestService) -> eyre::Result<()> {
    let manager = Caller::new(UserId::new(), RoleSet::single(Role::ProjectManager));
    let result = service.create_user(&manager, [Role::TeamMember]).await;

    let Err(ProvisioningError::NotAuthorized { user }) = result else {
        bail!("expected authorization failure, got {result:?}");
    };
    ensure!(user == manager.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_team_requires_project_manager(service: TestService) {
    let admin = admin();
    let result = service
        .create_team(&admin, CreateTeamRequest::new("Platform"))
        .await;

    assert!(matches!(
        result,
        Err(ProvisioningError::NotAuthorized { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_team_with_provisioned_rosters(service: TestService) -> eyre::Result<()> {
    let admin = admin();
    let leader = service.create_user(&admin, [Role::TeamLeader]).await?;
    let member = service.create_user(&admin, [Role::TeamMember]).await?;
    let manager = service
        .create_user(&admin, [Role::ProjectManager])
        .await?
        .as_caller();

    let request = CreateTeamRequest::new("Platform")
        .with_leaders([leader.id()])
        .with_members([member.id()]);
    let team = service.create_team(&manager, request).await?;

    ensure!(team.is_leader(leader.id()));
    ensure!(team.has_member(member.id()));
    ensure!(team.created_by() == manager.user_id());
    let fetched = service.find_team(team.id()).await?;
    ensure!(fetched == Some(team));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_team_rejects_roster_user_without_role(service: TestService) -> eyre::Result<()> {
    let admin = admin();
    let member = service.create_user(&admin, [Role::TeamMember]).await?;
    let manager = service
        .create_user(&admin, [Role::ProjectManager])
        .await?
        .as_caller();

    // A plain member cannot sit in the leader roster.
    let request = CreateTeamRequest::new("Platform").with_leaders([member.id()]);
    let result = service.create_team(&manager, request).await;

    let Err(ProvisioningError::MissingRole { user, role }) = result else {
        bail!("expected missing role, got {result:?}");
    };
    ensure!(user == member.id());
    ensure!(role == Role::TeamLeader);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_team_rejects_unknown_roster_user(service: TestService) -> eyre::Result<()> {
    let admin = admin();
    let manager = service
        .create_user(&admin, [Role::ProjectManager])
        .await?
        .as_caller();

    let ghost = UserId::new();
    let request = CreateTeamRequest::new("Platform").with_members([ghost]);
    let result = service.create_team(&manager, request).await;

    let Err(ProvisioningError::Repository(DirectoryRepositoryError::UserNotFound(user))) = result
    else {
        bail!("expected unknown user, got {result:?}");
    };
    ensure!(user == ghost);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_requires_team_ownership(service: TestService) -> eyre::Result<()> {
    let admin = admin();
    let member = service.create_user(&admin, [Role::TeamMember]).await?;
    let owner = service
        .create_user(&admin, [Role::ProjectManager])
        .await?
        .as_caller();
    let other = service
        .create_user(&admin, [Role::ProjectManager])
        .await?
        .as_caller();
    let team = service
        .create_team(&owner, CreateTeamRequest::new("Platform"))
        .await?;

    let result = service.add_member(&other, team.id(), member.id()).await;
    let Err(ProvisioningError::NotTeamOwner { team: team_id, user }) = result else {
        bail!("expected ownership failure, got {result:?}");
    };
    ensure!(team_id == team.id());
    ensure!(user == other.user_id());

    let updated = service.add_member(&owner, team.id(), member.id()).await?;
    ensure!(updated.has_member(member.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn administrator_may_amend_any_team(service: TestService) -> eyre::Result<()> {
    let admin = admin();
    let leader = service.create_user(&admin, [Role::TeamLeader]).await?;
    let owner = service
        .create_user(&admin, [Role::ProjectManager])
        .await?
        .as_caller();
    let team = service
        .create_team(&owner, CreateTeamRequest::new("Platform"))
        .await?;

    let updated = service.add_leader(&admin, team.id(), leader.id()).await?;
    ensure!(updated.is_leader(leader.id()));
    Ok(())
}

//! Unit tests for projects and project assignments.

use crate::assignment::domain::{
    AssignmentDomainError, Project, ProjectAssignment, ProjectStatus,
};
use crate::directory::domain::{TeamId, UserId};
use chrono::{Duration, Utc};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
#[case(ProjectStatus::Pending, "pending")]
#[case(ProjectStatus::InProgress, "in_progress")]
#[case(ProjectStatus::Completed, "completed")]
fn project_status_round_trips_through_canonical_form(
    #[case] status: ProjectStatus,
    #[case] text: &str,
) {
    assert_eq!(status.as_str(), text);
    assert_eq!(ProjectStatus::try_from(text), Ok(status));
}

#[rstest]
fn project_status_parse_rejects_unknown_value() {
    assert!(ProjectStatus::try_from("archived").is_err());
}

#[rstest]
fn new_project_starts_pending(clock: DefaultClock) -> eyre::Result<()> {
    let project = Project::new("Rollout", "Initial rollout", UserId::new(), &clock)?;
    ensure!(project.status() == ProjectStatus::Pending);
    ensure!(project.title() == "Rollout");
    Ok(())
}

#[rstest]
fn project_rejects_empty_title(clock: DefaultClock) {
    let result = Project::new("   ", "", UserId::new(), &clock);
    assert!(matches!(
        result,
        Err(AssignmentDomainError::EmptyProjectTitle)
    ));
}

#[rstest]
fn set_status_updates_project(clock: DefaultClock) -> eyre::Result<()> {
    let mut project = Project::new("Rollout", "", UserId::new(), &clock)?;
    project.set_status(ProjectStatus::InProgress, &clock);
    ensure!(project.status() == ProjectStatus::InProgress);
    Ok(())
}

#[rstest]
fn retire_deactivates_assignment_once(clock: DefaultClock) -> eyre::Result<()> {
    let deadline = Utc::now() + Duration::days(14);
    let mut assignment = ProjectAssignment::new(
        crate::assignment::domain::ProjectId::new(),
        TeamId::new(),
        UserId::new(),
        deadline,
        &clock,
    );
    ensure!(assignment.is_active());

    assignment.retire(&clock)?;
    ensure!(!assignment.is_active());
    ensure!(assignment.retired_at().is_some());

    let result = assignment.retire(&clock);
    let Err(AssignmentDomainError::AlreadyRetired(id)) = result else {
        bail!("expected already-retired failure, got {result:?}");
    };
    ensure!(id == assignment.id());
    Ok(())
}

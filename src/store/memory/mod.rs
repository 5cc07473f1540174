//! In-memory entity store backing every port.

mod assignment;
mod cascade;
mod directory;
mod hierarchy;
mod workitem;

use crate::assignment::domain::{AssignmentId, Project, ProjectAssignment, ProjectId};
use crate::directory::domain::{Team, TeamId, User, UserId};
use crate::workitem::domain::{Subtask, SubtaskId, Task, TaskId};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Every entity map under one lock.
///
/// `active_assignments` is the uniqueness index enforcing at most one
/// active assignment per project; it is maintained on every insert,
/// retirement, and cascade commit. The state is cloneable so a cascade
/// can be applied to a copy and swapped in whole.
#[derive(Debug, Clone, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    teams: HashMap<TeamId, Team>,
    projects: HashMap<ProjectId, Project>,
    assignments: HashMap<AssignmentId, ProjectAssignment>,
    active_assignments: HashMap<ProjectId, AssignmentId>,
    tasks: HashMap<TaskId, Task>,
    subtasks: HashMap<SubtaskId, Subtask>,
}

/// Thread-safe in-memory store implementing every persistence port, the
/// hierarchy resolver, and the cascade store.
///
/// A single write lock serializes every mutation, so entity creation can
/// never interleave with a cascade commit.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

//! Work-item port implementations.

use super::InMemoryStore;
use crate::assignment::domain::AssignmentId;
use crate::workitem::domain::{Subtask, SubtaskId, Task, TaskId};
use crate::workitem::ports::{
    WorkItemRepository, WorkItemRepositoryError, WorkItemRepositoryResult,
};
use async_trait::async_trait;

#[async_trait]
impl WorkItemRepository for InMemoryStore {
    async fn insert_task(&self, task: &Task) -> WorkItemRepositoryResult<()> {
        let mut state = self.write().map_err(WorkItemRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(WorkItemRepositoryError::Duplicate(task.work_item_id()));
        }
        let Some(assignment) = state.assignments.get(&task.assignment_id()) else {
            return Err(WorkItemRepositoryError::AssignmentMissing(
                task.assignment_id(),
            ));
        };
        if !assignment.is_active() {
            return Err(WorkItemRepositoryError::AssignmentRetired(
                task.assignment_id(),
            ));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn insert_subtask(&self, subtask: &Subtask) -> WorkItemRepositoryResult<()> {
        let mut state = self.write().map_err(WorkItemRepositoryError::persistence)?;
        if state.subtasks.contains_key(&subtask.id()) {
            return Err(WorkItemRepositoryError::Duplicate(subtask.work_item_id()));
        }
        if !state.tasks.contains_key(&subtask.parent_task_id()) {
            return Err(WorkItemRepositoryError::ParentTaskMissing(
                subtask.parent_task_id(),
            ));
        }
        state.subtasks.insert(subtask.id(), subtask.clone());
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> WorkItemRepositoryResult<Option<Task>> {
        let state = self.read().map_err(WorkItemRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_subtask(&self, id: SubtaskId) -> WorkItemRepositoryResult<Option<Subtask>> {
        let state = self.read().map_err(WorkItemRepositoryError::persistence)?;
        Ok(state.subtasks.get(&id).cloned())
    }

    async fn update_task(
        &self,
        task: &Task,
        expected_version: u64,
    ) -> WorkItemRepositoryResult<()> {
        let mut state = self.write().map_err(WorkItemRepositoryError::persistence)?;
        let Some(stored) = state.tasks.get(&task.id()) else {
            return Err(WorkItemRepositoryError::NotFound(task.work_item_id()));
        };
        if stored.version() != expected_version {
            return Err(WorkItemRepositoryError::StaleVersion {
                item: task.work_item_id(),
                expected: expected_version,
                actual: stored.version(),
            });
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_subtask(
        &self,
        subtask: &Subtask,
        expected_version: u64,
    ) -> WorkItemRepositoryResult<()> {
        let mut state = self.write().map_err(WorkItemRepositoryError::persistence)?;
        let Some(stored) = state.subtasks.get(&subtask.id()) else {
            return Err(WorkItemRepositoryError::NotFound(subtask.work_item_id()));
        };
        if stored.version() != expected_version {
            return Err(WorkItemRepositoryError::StaleVersion {
                item: subtask.work_item_id(),
                expected: expected_version,
                actual: stored.version(),
            });
        }
        state.subtasks.insert(subtask.id(), subtask.clone());
        Ok(())
    }

    async fn tasks_for_assignment(
        &self,
        assignment: AssignmentId,
    ) -> WorkItemRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(WorkItemRepositoryError::persistence)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.assignment_id() == assignment)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::id);
        Ok(tasks)
    }

    async fn subtasks_for_task(&self, task: TaskId) -> WorkItemRepositoryResult<Vec<Subtask>> {
        let state = self.read().map_err(WorkItemRepositoryError::persistence)?;
        let mut subtasks: Vec<Subtask> = state
            .subtasks
            .values()
            .filter(|subtask| subtask.parent_task_id() == task)
            .cloned()
            .collect();
        subtasks.sort_by_key(Subtask::id);
        Ok(subtasks)
    }
}

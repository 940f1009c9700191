//! In-memory task repository with atomic batch commits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Status, Task, TaskId, TaskPatch},
    ports::{BatchWrite, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Batch commits are validated in full before any write is applied, so a
/// failing batch leaves every task untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.values().cloned().collect())
    }

    async fn list_by_status(&self, status: Status) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut lane: Vec<Task> = state
            .values()
            .filter(|task| task.status() == status)
            .cloned()
            .collect();
        lane.sort_by_key(Task::order);
        Ok(lane)
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let task = state.get_mut(&id).ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn commit(&self, batch: Vec<BatchWrite>) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;

        // Validate the whole batch before touching anything.
        for write in &batch {
            let id = match write {
                BatchWrite::Update(id, _) | BatchWrite::Delete(id) => *id,
            };
            if !state.contains_key(&id) {
                return Err(TaskRepositoryError::NotFound(id));
            }
        }

        for write in batch {
            match write {
                BatchWrite::Update(id, patch) => {
                    if let Some(task) = state.get_mut(&id) {
                        task.apply_patch(patch);
                    }
                }
                BatchWrite::Delete(id) => {
                    state.remove(&id);
                }
            }
        }
        Ok(())
    }
}

//! Repository port for the task document store.

use crate::task::domain::{Status, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// One write inside an atomic multi-document commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchWrite {
    /// Apply a partial update to the identified task.
    Update(TaskId, TaskPatch),
    /// Remove the identified task.
    Delete(TaskId),
}

/// Task document store contract.
///
/// The store owns identifier assignment and atomicity; the board core
/// layers ordering and transition semantics on top.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every stored task, in no particular order.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the members of one lane, sorted by `order` ascending.
    async fn list_by_status(&self, status: Status) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Applies every write in `batch`, all-or-nothing.
    ///
    /// Observers must never see a partially applied batch: either every
    /// write lands or none do.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when any targeted task
    /// does not exist; in that case no write is applied.
    async fn commit(&self, batch: Vec<BatchWrite>) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

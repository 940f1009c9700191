//! Batch coordinator: one status change or deletion over a selection.

use crate::task::{
    domain::{ActivityEntry, Status, Task, TaskId, TaskPatch, append_order, descriptions},
    ports::{BatchWrite, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the batch coordinator.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A selected task does not exist; the whole batch was abandoned.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Repository operation failed; no write of this batch was applied.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Applies one operation to a caller-selected set of tasks as a single
/// unit of work.
///
/// The coordinator is stateless across calls: selection state is owned
/// by the caller, and every operation either fully applies or fully
/// fails.
#[derive(Clone)]
pub struct BatchCoordinator<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BatchCoordinator<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new batch coordinator.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Moves every selected task to `new_status` in one atomic commit.
    ///
    /// Each moved task gains exactly one `status changed to <new>` entry.
    /// The destination lane is not renumbered; joining tasks are appended
    /// after its highest order, in their prior relative order, so the
    /// per-lane ordering invariant still holds. Tasks already in
    /// `new_status` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::TaskNotFound`] when any selected id is
    /// missing (the whole batch fails before any write), or
    /// [`BatchError::Repository`] when the commit fails, in which case
    /// none of the selected tasks were updated.
    pub async fn batch_update_status(
        &self,
        task_ids: &[TaskId],
        new_status: Status,
    ) -> BatchResult<()> {
        let mut movers = Vec::with_capacity(task_ids.len());
        for id in task_ids {
            let task = self
                .repository
                .find_by_id(*id)
                .await?
                .ok_or(BatchError::TaskNotFound(*id))?;
            if task.status() != new_status {
                movers.push(task);
            }
        }
        if movers.is_empty() {
            return Ok(());
        }
        movers.sort_by_key(Task::order);

        let destination_lane = self.repository.list_by_status(new_status).await?;
        let orders: Vec<i64> = destination_lane.iter().map(Task::order).collect();
        let mut next_order = append_order(&orders);

        let mut batch = Vec::with_capacity(movers.len());
        for task in &movers {
            let entry = ActivityEntry::now(descriptions::status_set(new_status), &*self.clock);
            batch.push(BatchWrite::Update(
                task.id(),
                TaskPatch::new()
                    .with_status(new_status)
                    .with_order(next_order)
                    .with_activity_entry(entry),
            ));
            next_order = next_order.saturating_add(1);
        }

        debug!(selected = task_ids.len(), moved = batch.len(), to = %new_status, "batch status change");
        self.repository.commit(batch).await.map_err(map_not_found)
    }

    /// Deletes every selected task in one atomic commit.
    ///
    /// Deletion is not activity-logged: the documents cease to exist.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::TaskNotFound`] when any selected id is
    /// missing, or [`BatchError::Repository`] when the commit fails; in
    /// either case no task was deleted.
    pub async fn batch_delete(&self, task_ids: &[TaskId]) -> BatchResult<()> {
        if task_ids.is_empty() {
            return Ok(());
        }
        let batch: Vec<BatchWrite> = task_ids.iter().map(|id| BatchWrite::Delete(*id)).collect();
        debug!(selected = task_ids.len(), "batch delete");
        self.repository.commit(batch).await.map_err(map_not_found)
    }
}

/// Surfaces a commit-time missing task as the batch's not-found error.
fn map_not_found(err: TaskRepositoryError) -> BatchError {
    match err {
        TaskRepositoryError::NotFound(id) => BatchError::TaskNotFound(id),
        other => BatchError::Repository(other),
    }
}

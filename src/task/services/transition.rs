//! Transition engine: single-task moves within and between lanes.

use crate::task::{
    domain::{
        ActivityEntry, OrderAssignment, Status, Task, TaskId, TaskPatch, descriptions,
        plan_insertion, plan_removal,
    },
    ports::{BatchWrite, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the transition engine.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The task vanished between load and update; the move is abandoned.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Repository operation failed; no write of this move was applied.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for transition engine operations.
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Moves a single task to a new `(status, position)` in one logical
/// operation.
///
/// Lane renumbering, the status change, and the audit entry all ride in
/// one atomic commit, so observers never see a half-applied move. The
/// engine re-reads lane membership immediately before writing and holds
/// no lock across the await; concurrent writers race under
/// last-write-wins.
#[derive(Clone)]
pub struct TransitionEngine<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TransitionEngine<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new transition engine.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Moves `task_id` to `destination_status` at `destination_index`.
    ///
    /// The index is 0-based and clamped to the destination lane's length,
    /// so any index past the end appends. Moving a task to its current
    /// position is a no-op: no writes, no activity entry. Cross-lane
    /// moves append exactly one `status changed from <old> to <new>`
    /// entry; intra-lane reorders append none.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::TaskNotFound`] when the task does not
    /// exist, or [`TransitionError::Repository`] when the commit fails,
    /// in which case none of the move's writes were applied.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        destination_status: Status,
        destination_index: usize,
    ) -> TransitionResult<()> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TransitionError::TaskNotFound(task_id))?;

        if task.status() == destination_status {
            self.reorder_within_lane(&task, destination_index).await
        } else {
            self.move_across_lanes(&task, destination_status, destination_index)
                .await
        }
    }

    async fn reorder_within_lane(&self, task: &Task, index: usize) -> TransitionResult<()> {
        let lane = self.repository.list_by_status(task.status()).await?;
        let current_position = lane.iter().position(|member| member.id() == task.id());
        let others: Vec<TaskId> = lane
            .iter()
            .map(Task::id)
            .filter(|id| *id != task.id())
            .collect();

        if current_position == Some(index.min(others.len())) {
            debug!(task_id = %task.id(), status = %task.status(), "reorder is a no-op");
            return Ok(());
        }

        let assignments = plan_insertion(&others, task.id(), index);
        let batch = order_updates(&lane, &assignments);
        if batch.is_empty() {
            return Ok(());
        }
        debug!(
            task_id = %task.id(),
            status = %task.status(),
            index,
            writes = batch.len(),
            "reordering lane"
        );
        Ok(self.repository.commit(batch).await?)
    }

    async fn move_across_lanes(
        &self,
        task: &Task,
        destination_status: Status,
        index: usize,
    ) -> TransitionResult<()> {
        let source_lane = self.repository.list_by_status(task.status()).await?;
        let destination_lane = self.repository.list_by_status(destination_status).await?;

        let source_ids: Vec<TaskId> = source_lane.iter().map(Task::id).collect();
        let destination_ids: Vec<TaskId> = destination_lane.iter().map(Task::id).collect();

        let mut batch = order_updates(&source_lane, &plan_removal(&source_ids, task.id()));

        let destination_orders = current_orders(&destination_lane);
        for assignment in plan_insertion(&destination_ids, task.id(), index) {
            if assignment.task_id == task.id() {
                let entry = ActivityEntry::now(
                    descriptions::status_changed(task.status(), destination_status),
                    &*self.clock,
                );
                batch.push(BatchWrite::Update(
                    task.id(),
                    TaskPatch::new()
                        .with_status(destination_status)
                        .with_order(assignment.order)
                        .with_activity_entry(entry),
                ));
            } else if let Some(update) = order_update(&destination_orders, assignment) {
                batch.push(update);
            }
        }

        debug!(
            task_id = %task.id(),
            from = %task.status(),
            to = %destination_status,
            index,
            writes = batch.len(),
            "moving task across lanes"
        );
        Ok(self.repository.commit(batch).await?)
    }
}

fn current_orders(lane: &[Task]) -> HashMap<TaskId, i64> {
    lane.iter()
        .map(|member| (member.id(), member.order()))
        .collect()
}

/// Turns planned assignments into update writes, skipping tasks whose
/// order is already the planned value.
fn order_updates(lane: &[Task], assignments: &[OrderAssignment]) -> Vec<BatchWrite> {
    let current = current_orders(lane);
    assignments
        .iter()
        .filter_map(|assignment| order_update(&current, *assignment))
        .collect()
}

fn order_update(
    current: &HashMap<TaskId, i64>,
    assignment: OrderAssignment,
) -> Option<BatchWrite> {
    match current.get(&assignment.task_id) {
        Some(order) if *order == assignment.order => None,
        _ => Some(BatchWrite::Update(
            assignment.task_id,
            TaskPatch::new().with_order(assignment.order),
        )),
    }
}

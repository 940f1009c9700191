//! Lane ordering policy: append-only growth and dense renumbering.
//!
//! `order` values are unique only within one lane and define the lane's
//! presentation order, ascending. Plain creation appends at the end of a
//! lane; drag-and-drop moves renumber the lane densely so the moved task
//! lands at the requested relative position.

use super::TaskId;

/// New `order` value planned for one task in a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssignment {
    /// Task receiving the value.
    pub task_id: TaskId,
    /// The new order value.
    pub order: i64,
}

/// Returns the order value for a task appended to a lane.
///
/// Append-only growth: `max(order in lane) + 1`, or `1` for an empty
/// lane. Used for plain creation and for tasks joining a lane through a
/// batch status change, never for reordering.
#[must_use]
pub fn append_order(lane_orders: &[i64]) -> i64 {
    lane_orders
        .iter()
        .copied()
        .max()
        .map_or(1, |highest| highest.saturating_add(1))
}

/// Plans a dense renumbering of `lane` with `moving` placed at `index`.
///
/// `lane` lists the lane's task ids in current order and must not contain
/// `moving`; callers strip it first for intra-lane moves. The index is
/// clamped to `[0, lane.len()]`, so anything past the end appends.
/// Surviving tasks keep their relative order and every task in the
/// resulting lane is assigned `position + 1`.
#[must_use]
pub fn plan_insertion(lane: &[TaskId], moving: TaskId, index: usize) -> Vec<OrderAssignment> {
    let clamped = index.min(lane.len());
    let mut ids: Vec<TaskId> = Vec::with_capacity(lane.len() + 1);
    ids.extend(lane.iter().copied().take(clamped));
    ids.push(moving);
    ids.extend(lane.iter().copied().skip(clamped));
    number_densely(&ids)
}

/// Plans a dense renumbering of a lane after `removed` leaves it.
///
/// Leaving gaps would also satisfy the strictly-increasing invariant;
/// renumbering keeps source lanes dense so later index arithmetic stays
/// trivial.
#[must_use]
pub fn plan_removal(lane: &[TaskId], removed: TaskId) -> Vec<OrderAssignment> {
    let ids: Vec<TaskId> = lane.iter().copied().filter(|id| *id != removed).collect();
    number_densely(&ids)
}

fn number_densely(ids: &[TaskId]) -> Vec<OrderAssignment> {
    ids.iter()
        .enumerate()
        .map(|(position, id)| OrderAssignment {
            task_id: *id,
            order: order_at(position),
        })
        .collect()
}

/// Converts a 0-based lane position into a 1-based order value.
fn order_at(position: usize) -> i64 {
    i64::try_from(position).map_or(i64::MAX, |value| value.saturating_add(1))
}

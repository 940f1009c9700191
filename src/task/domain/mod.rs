//! Domain model for the task board.
//!
//! The task domain models the board's single aggregate (the task), the
//! lane ordering policy, the append-only activity log, and the pure
//! list/board view projections, keeping all infrastructure concerns
//! outside of the domain boundary.

mod activity;
mod error;
mod ids;
mod ordering;
mod task;
mod view;

pub use activity::{ActivityEntry, ActivityLog, descriptions};
pub use error::{ParseCategoryError, ParseStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use ordering::{OrderAssignment, append_order, plan_insertion, plan_removal};
pub use task::{Category, NewTaskData, PersistedTaskData, Status, Task, TaskPatch};
pub(crate) use task::validate_new_description;
pub use view::{DueBucket, DueDateDirection, LaneView, TaskFilter, lanes, sort_by_due_date};

//! Read-only lane grouping, filtering, and sorting projections.
//!
//! Everything here is a pure function of the task set and the filter and
//! sort parameters: no hidden state, no side effects. The "today" used by
//! due-date buckets is passed in by the caller so projections stay
//! re-derivable.

use super::{Category, Status, Task};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Due-date bucket filters, evaluated against a caller-supplied date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    /// Due exactly today.
    Today,
    /// Due in the current calendar month.
    ThisMonth,
    /// Due in the current calendar year.
    ThisYear,
}

impl DueBucket {
    /// Returns `true` when `due` falls inside the bucket relative to
    /// `today`.
    #[must_use]
    pub fn contains(self, due: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Today => due == today,
            Self::ThisMonth => due.year() == today.year() && due.month() == today.month(),
            Self::ThisYear => due.year() == today.year(),
        }
    }
}

/// Filter parameters for the list and board views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    category: Option<Category>,
    due: Option<DueBucket>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows to titles containing `text`, case-insensitively.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Narrows to tasks in `category`.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Narrows to tasks whose due date falls in `bucket`.
    ///
    /// Tasks without a due date never match a bucket filter.
    #[must_use]
    pub const fn with_due_bucket(mut self, bucket: DueBucket) -> Self {
        self.due = Some(bucket);
        self
    }

    /// Returns `true` when `task` satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if let Some(needle) = &self.search {
            let haystack = task.title().as_str().to_lowercase();
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if task.category() != category {
                return false;
            }
        }
        if let Some(bucket) = self.due {
            if !task.due_date().is_some_and(|due| bucket.contains(due, today)) {
                return false;
            }
        }
        true
    }
}

/// Tasks grouped into the three status lanes, each sorted by `order`
/// ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneView {
    /// Tasks in the todo lane.
    pub todo: Vec<Task>,
    /// Tasks in the in-progress lane.
    pub in_progress: Vec<Task>,
    /// Tasks in the completed lane.
    pub completed: Vec<Task>,
}

impl LaneView {
    /// Returns the lane holding tasks with `status`.
    #[must_use]
    pub const fn lane(&self, status: Status) -> &Vec<Task> {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Completed => &self.completed,
        }
    }

    /// Total number of tasks across all three lanes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    /// Returns `true` when all three lanes are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.todo.is_empty() && self.in_progress.is_empty() && self.completed.is_empty()
    }
}

/// Groups `tasks` into lanes after applying `filter`.
#[must_use]
pub fn lanes(tasks: &[Task], filter: &TaskFilter, today: NaiveDate) -> LaneView {
    let mut view = LaneView::default();
    for task in tasks {
        if !filter.matches(task, today) {
            continue;
        }
        match task.status() {
            Status::Todo => view.todo.push(task.clone()),
            Status::InProgress => view.in_progress.push(task.clone()),
            Status::Completed => view.completed.push(task.clone()),
        }
    }
    view.todo.sort_by_key(Task::order);
    view.in_progress.sort_by_key(Task::order);
    view.completed.sort_by_key(Task::order);
    view
}

/// Sort direction for the due-date comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateDirection {
    /// Earliest due date first.
    Ascending,
    /// Latest due date first.
    Descending,
}

/// Sorts tasks by due date in the given direction.
///
/// Tasks without a due date sort to the end regardless of direction; the
/// sort is stable, so such tasks keep their relative order.
#[must_use]
pub fn sort_by_due_date(tasks: &[Task], direction: DueDateDirection) -> Vec<Task> {
    let mut sorted: Vec<Task> = tasks.to_vec();
    sorted.sort_by(|a, b| compare_due(a.due_date(), b.due_date(), direction));
    sorted
}

fn compare_due(a: Option<NaiveDate>, b: Option<NaiveDate>, direction: DueDateDirection) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => match direction {
            DueDateDirection::Ascending => left.cmp(&right),
            DueDateDirection::Descending => right.cmp(&left),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

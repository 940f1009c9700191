//! Service layer for task creation, editing, and retrieval.

use crate::task::{
    domain::{
        ActivityEntry, Category, NewTaskData, Status, Task, TaskDomainError, TaskId, TaskPatch,
        TaskTitle, append_order, descriptions, validate_new_description,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    category: Category,
    due_date: Option<NaiveDate>,
    status: Status,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields; the task starts in the
    /// todo lane unless [`Self::with_status`] overrides it.
    #[must_use]
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            due_date: None,
            status: Status::Todo,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the starting lane.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// Request payload for editing a task's fields.
///
/// Only the fields set on the request are touched; each changed field
/// produces one activity entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<Category>,
    due_date: Option<Option<NaiveDate>>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description. Edits are not length-limited.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed; nothing was written.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist (or vanished between load and update).
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task creation and editing service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task at the end of its starting lane.
    ///
    /// Validation happens before any store call: an empty title or an
    /// overlong description is rejected without touching the repository
    /// and without creating any activity entry. The new task's `order`
    /// is `max(order in lane) + 1` and its activity log holds exactly
    /// the creation event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        if let Some(description) = &request.description {
            validate_new_description(description)?;
        }

        let lane = self.repository.list_by_status(request.status).await?;
        let orders: Vec<i64> = lane.iter().map(Task::order).collect();
        let order = append_order(&orders);

        let task = Task::create(
            NewTaskData {
                title,
                description: request.description,
                category: request.category,
                due_date: request.due_date,
                status: request.status,
                order,
            },
            &*self.clock,
        );
        self.repository.insert(&task).await?;
        debug!(task_id = %task.id(), status = %task.status(), order, "task created");
        Ok(task)
    }

    /// Applies a partial edit, recording one activity entry per changed
    /// field.
    ///
    /// Fields whose new value equals the current one are skipped; an edit
    /// that changes nothing performs no repository write at all.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does
    /// not exist, [`TaskLifecycleError::Domain`] when a new title fails
    /// validation, or [`TaskLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn edit_task(
        &self,
        task_id: TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;

        let patch = self.edit_patch(&task, request)?;
        if patch.is_noop() {
            return Ok(task);
        }

        self.repository.update(task_id, patch.clone()).await?;
        task.apply_patch(patch);
        debug!(task_id = %task_id, "task edited");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns every stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Builds the patch for an edit, one activity entry per changed field.
    fn edit_patch(&self, task: &Task, request: EditTaskRequest) -> TaskLifecycleResult<TaskPatch> {
        let mut patch = TaskPatch::new();

        if let Some(raw_title) = request.title {
            let title = TaskTitle::new(raw_title)?;
            if &title != task.title() {
                patch = patch
                    .with_title(title)
                    .with_activity_entry(self.entry(descriptions::TITLE_CHANGED));
            }
        }
        if let Some(description) = request.description {
            if task.description() != Some(description.as_str()) {
                patch = patch
                    .with_description(description)
                    .with_activity_entry(self.entry(descriptions::DESCRIPTION_CHANGED));
            }
        }
        if let Some(category) = request.category {
            if category != task.category() {
                patch = patch
                    .with_category(category)
                    .with_activity_entry(self.entry(descriptions::CATEGORY_CHANGED));
            }
        }
        if let Some(due_date) = request.due_date {
            if due_date != task.due_date() {
                patch = patch
                    .with_due_date(due_date)
                    .with_activity_entry(self.entry(descriptions::DUE_DATE_CHANGED));
            }
        }
        Ok(patch)
    }

    fn entry(&self, description: &str) -> ActivityEntry {
        ActivityEntry::now(description, &*self.clock)
    }
}

//! Task aggregate root and related board types.

use super::error::MAX_DESCRIPTION_LEN;
use super::{
    ActivityEntry, ActivityLog, ParseCategoryError, ParseStatusError, TaskDomainError, TaskId,
    TaskTitle,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lane identifier for a task.
///
/// Transitions between lanes are unrestricted: the state machine is fully
/// connected over the three lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Task has not been started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

impl Status {
    /// All lanes, in presentation order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        // Older documents carry "in-progress" and "in_progress" spellings.
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Work task.
    Work,
    /// Personal task.
    Personal,
}

impl Category {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            _ => Err(ParseCategoryError(value.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    status: Status,
    order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_url: Option<String>,
    activity: ActivityLog,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for assembling a brand-new task.
///
/// The `order` value is expected to come from the lane ordering policy
/// before the task is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional description, already length-checked at the service layer.
    pub description: Option<String>,
    /// Category the task belongs to.
    pub category: Category,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Lane the task starts in.
    pub status: Status,
    /// Position within the starting lane.
    pub order: i64,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted category.
    pub category: Category,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted lane.
    pub status: Status,
    /// Persisted position within the lane.
    pub order: i64,
    /// Persisted attachment URL, if any.
    pub attachment_url: Option<String>,
    /// Persisted activity entries, oldest first.
    pub activity: ActivityLog,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a seeded activity log.
    ///
    /// The log's first entry is always the creation event.
    #[must_use]
    pub fn create(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            category: data.category,
            due_date: data.due_date,
            status: data.status,
            order: data.order,
            attachment_url: None,
            activity: ActivityLog::seeded(timestamp),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            due_date: data.due_date,
            status: data.status,
            order: data.order,
            attachment_url: data.attachment_url,
            activity: data.activity,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the lane the task sits in.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the position within the lane.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the attachment URL, if any.
    #[must_use]
    pub fn attachment_url(&self) -> Option<&str> {
        self.attachment_url.as_deref()
    }

    /// Returns the activity log.
    #[must_use]
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update in place.
    ///
    /// When the patch carries an activity entry it is appended after all
    /// existing entries and its timestamp becomes the task's
    /// `updated_at`. Patches without an entry (lane renumbering of
    /// bystander tasks) leave `updated_at` alone.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(url) = patch.attachment_url {
            self.attachment_url = Some(url);
        }
        for entry in patch.activity_entries {
            self.updated_at = entry.timestamp;
            self.activity = self.activity.appended(entry);
        }
    }
}

/// Validates a description against the creation-time length limit.
///
/// The limit applies only at creation; edits are unbounded (canonical
/// behavior carried over from the observed system).
///
/// # Errors
///
/// Returns [`TaskDomainError::DescriptionTooLong`] when the text exceeds
/// 300 characters.
pub(crate) fn validate_new_description(description: &str) -> Result<(), TaskDomainError> {
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LEN {
        return Err(TaskDomainError::DescriptionTooLong(length));
    }
    Ok(())
}

/// Partial update applied to a persisted task document.
///
/// Mirrors the store's `updateFields` shape: only the fields present in
/// the patch are written. Activity entries ride in the same patch so an
/// audit record can never persist without the change it describes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    category: Option<Category>,
    due_date: Option<Option<NaiveDate>>,
    status: Option<Status>,
    order: Option<i64>,
    attachment_url: Option<String>,
    activity_entries: Vec<ActivityEntry>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new category.
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

    /// Sets a new lane.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new position within the lane.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the attachment URL.
    #[must_use]
    pub fn with_attachment_url(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }

    /// Appends an activity entry in the same write as the field changes.
    #[must_use]
    pub fn with_activity_entry(mut self, entry: ActivityEntry) -> Self {
        self.activity_entries.push(entry);
        self
    }

    /// Returns `true` when the patch carries no changes at all.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.order.is_none()
            && self.attachment_url.is_none()
            && self.activity_entries.is_empty()
    }
}

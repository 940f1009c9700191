//! Append-only activity trail recorded against each task.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single timestamped record of one change made to a task.
///
/// Entries are immutable once created; the log they live in only ever
/// grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the change was made.
    pub timestamp: DateTime<Utc>,
    /// Human-readable description of the change.
    pub description: String,
}

impl ActivityEntry {
    /// Creates an entry with an explicit timestamp.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
        }
    }

    /// Creates an entry stamped with the current clock time.
    #[must_use]
    pub fn now(description: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(clock.utc(), description)
    }
}

/// Ordered, append-only sequence of activity entries.
///
/// The first entry of a task's log is always the creation event. Appends
/// produce a new log; existing entries are never edited, dropped, or
/// reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog(Vec<ActivityEntry>);

impl ActivityLog {
    /// Creates a log holding only the creation event.
    #[must_use]
    pub fn seeded(created_at: DateTime<Utc>) -> Self {
        Self(vec![ActivityEntry::new(created_at, descriptions::CREATED)])
    }

    /// Reconstructs a log from persisted entries.
    #[must_use]
    pub const fn from_entries(entries: Vec<ActivityEntry>) -> Self {
        Self(entries)
    }

    /// Returns a new log with `entry` appended after all existing entries.
    #[must_use]
    pub fn appended(&self, entry: ActivityEntry) -> Self {
        let mut entries = self.0.clone();
        entries.push(entry);
        Self(entries)
    }

    /// Returns the entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.0
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the log holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Canonical entry descriptions used across the board core.
///
/// Centralizing these keeps every mutation path producing a uniform
/// entry shape.
pub mod descriptions {
    use crate::task::domain::Status;

    /// Description of the creation event.
    pub const CREATED: &str = "created";

    /// Description of an attachment being stored on a task.
    pub const ATTACHMENT_ADDED: &str = "attachment added";

    /// Description of a title edit.
    pub const TITLE_CHANGED: &str = "title changed";

    /// Description of a description edit.
    pub const DESCRIPTION_CHANGED: &str = "description changed";

    /// Description of a category edit.
    pub const CATEGORY_CHANGED: &str = "category changed";

    /// Description of a due-date edit.
    pub const DUE_DATE_CHANGED: &str = "due date changed";

    /// Description of a lane move, naming both statuses.
    #[must_use]
    pub fn status_changed(from: Status, to: Status) -> String {
        format!("status changed from {from} to {to}")
    }

    /// Description of a batch status change, naming the new status only.
    #[must_use]
    pub fn status_set(to: Status) -> String {
        format!("status changed to {to}")
    }
}

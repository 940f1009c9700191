//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Longest description accepted when a task is created.
pub(crate) const MAX_DESCRIPTION_LEN: usize = 300;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The description exceeds the creation-time length limit.
    #[error("description is {0} characters, creation limit is 300")]
    DescriptionTooLong(usize),
}

/// Error returned while parsing status values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing category values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseCategoryError(pub String);

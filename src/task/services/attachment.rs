//! Attachment service: uploads a file and records its URL on the task.

use crate::task::{
    domain::{ActivityEntry, Task, TaskId, TaskPatch, descriptions},
    ports::{AttachmentStore, AttachmentStoreError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the attachment service.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The upload collaborator rejected the file; the task is untouched.
    #[error(transparent)]
    Store(#[from] AttachmentStoreError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for attachment operations.
pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Stores attachments through the external collaborator and keeps only
/// the returned URL on the task.
#[derive(Clone)]
pub struct AttachmentService<R, S, C>
where
    R: TaskRepository,
    S: AttachmentStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> AttachmentService<R, S, C>
where
    R: TaskRepository,
    S: AttachmentStore,
    C: Clock + Send + Sync,
{
    /// Creates a new attachment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            store,
            clock,
        }
    }

    /// Uploads `bytes` and stores the resulting URL on the task, with one
    /// `attachment added` activity entry.
    ///
    /// The upload happens before any task write, so a rejected upload
    /// leaves the task exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::TaskNotFound`] when the task does not
    /// exist, [`AttachmentError::Store`] when the upload fails, or
    /// [`AttachmentError::Repository`] when persisting the URL fails.
    pub async fn attach(
        &self,
        task_id: TaskId,
        filename: &str,
        bytes: &[u8],
    ) -> AttachmentResult<Task> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(AttachmentError::TaskNotFound(task_id))?;

        let url = self.store.upload(filename, bytes).await?;
        let patch = TaskPatch::new()
            .with_attachment_url(url)
            .with_activity_entry(ActivityEntry::now(
                descriptions::ATTACHMENT_ADDED,
                &*self.clock,
            ));

        self.repository.update(task_id, patch.clone()).await?;
        task.apply_patch(patch);
        debug!(task_id = %task_id, filename, "attachment stored");
        Ok(task)
    }
}

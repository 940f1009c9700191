//! Attachment storage port.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for attachment store operations.
pub type AttachmentStoreResult<T> = Result<T, AttachmentStoreError>;

/// External binary storage for task attachments.
///
/// The board core never inspects file contents; it stores only the URL
/// returned by the collaborator.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Uploads `bytes` under `filename` and returns the stored URL.
    async fn upload(&self, filename: &str, bytes: &[u8]) -> AttachmentStoreResult<String>;
}

/// Errors returned by attachment store implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentStoreError {
    /// The upload was rejected or the transport failed.
    #[error("attachment upload failed: {0}")]
    Upload(String),
}

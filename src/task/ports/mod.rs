//! Port contracts consumed by the board core.

mod attachment;
mod repository;

pub use attachment::{AttachmentStore, AttachmentStoreError, AttachmentStoreResult};
pub use repository::{BatchWrite, TaskRepository, TaskRepositoryError, TaskRepositoryResult};

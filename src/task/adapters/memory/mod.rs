//! In-memory adapters for the task store and attachment ports.

mod attachment;
mod task;

pub use attachment::InMemoryAttachmentStore;
pub use task::InMemoryTaskRepository;

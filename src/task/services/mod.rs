//! Orchestration services for the board core.

mod attachment;
mod batch;
mod lifecycle;
mod transition;

pub use attachment::{AttachmentError, AttachmentResult, AttachmentService};
pub use batch::{BatchCoordinator, BatchError, BatchResult};
pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
pub use transition::{TransitionEngine, TransitionError, TransitionResult};

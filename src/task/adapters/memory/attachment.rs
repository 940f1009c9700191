//! In-memory attachment store for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{AttachmentStore, AttachmentStoreError, AttachmentStoreResult};

/// Attachment store that keeps uploads in process memory.
///
/// Returned URLs use the `memory://` scheme. The store can be flipped
/// into a failing mode to exercise upload error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentStore {
    uploads: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing: bool,
}

impl InMemoryAttachmentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every upload fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            uploads: Arc::default(),
            failing: true,
        }
    }

    /// Returns the stored bytes for `filename`, if any.
    #[must_use]
    pub fn stored(&self, filename: &str) -> Option<Vec<u8>> {
        self.uploads
            .read()
            .ok()
            .and_then(|uploads| uploads.get(filename).cloned())
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn upload(&self, filename: &str, bytes: &[u8]) -> AttachmentStoreResult<String> {
        if self.failing {
            return Err(AttachmentStoreError::Upload(format!(
                "upload of {filename} rejected"
            )));
        }
        let mut uploads = self
            .uploads
            .write()
            .map_err(|err| AttachmentStoreError::Upload(err.to_string()))?;
        uploads.insert(filename.to_owned(), bytes.to_vec());
        Ok(format!("memory://{filename}"))
    }
}

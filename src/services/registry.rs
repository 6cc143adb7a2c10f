//! Volatile registry of platform-held files, keyed by user.
//!
//! Process-lifetime only: built empty at startup, never persisted, lost
//! on restart. Shared across worker threads behind one `RwLock`; the
//! membership check and append happen under a single write guard so
//! registration stays atomic under true parallelism.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::RemoteFileDescriptor;

/// In-memory mapping from user id to their remote file descriptors,
/// in insertion order.
#[derive(Debug, Default)]
pub struct FileRegistry {
    max_per_user: Option<usize>,
    inner: RwLock<HashMap<i64, Vec<RemoteFileDescriptor>>>,
}

impl FileRegistry {
    /// Create an empty registry with an optional per-user cap.
    pub fn new(max_per_user: Option<usize>) -> Self {
        FileRegistry {
            max_per_user,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a descriptor for a user.
    ///
    /// Idempotent by handle: if the user already has a descriptor with
    /// the same `file_id` this is a no-op. When a per-user cap is
    /// configured, registering a new handle beyond it is rejected;
    /// re-registering an existing handle always succeeds.
    pub fn register(&self, user_id: i64, descriptor: RemoteFileDescriptor) -> AppResult<()> {
        let mut map = self.inner.write().expect("file registry lock poisoned");
        let files = map.entry(user_id).or_default();

        if files.iter().any(|f| f.file_id == descriptor.file_id) {
            debug!(
                user_id,
                file_id = %descriptor.file_id,
                "Remote file already registered, skipping"
            );
            return Ok(());
        }

        if let Some(cap) = self.max_per_user
            && files.len() >= cap
        {
            return Err(AppError::InvalidInput(format!(
                "user {} already has {} registered files (limit {})",
                user_id,
                files.len(),
                cap
            )));
        }

        debug!(
            user_id,
            file_id = %descriptor.file_id,
            file_name = %descriptor.file_name,
            "Registered remote file"
        );
        files.push(descriptor);
        Ok(())
    }

    /// List a user's remote PDFs, preserving registration order.
    ///
    /// Filters to descriptors whose display name ends in ".pdf"
    /// case-insensitively. Unknown users get an empty list.
    pub fn list_pdfs(&self, user_id: i64) -> Vec<RemoteFileDescriptor> {
        let map = self.inner.read().expect("file registry lock poisoned");
        map.get(&user_id)
            .map(|files| files.iter().filter(|f| f.is_pdf()).cloned().collect())
            .unwrap_or_default()
    }

    /// Number of descriptors registered for a user, regardless of type.
    pub fn len_for(&self, user_id: i64) -> usize {
        let map = self.inner.read().expect("file registry lock poisoned");
        map.get(&user_id).map(Vec::len).unwrap_or(0)
    }
}

//! Remote file descriptors held by the Telegram platform.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A file held by Telegram on behalf of a user.
///
/// Identity is the `file_id` handle; the bytes live on the platform and
/// must be resolved to a transient URL before they can be fetched.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoteFileDescriptor {
    /// Opaque platform file identifier
    pub file_id: String,
    /// Display name as sent by the user
    pub file_name: String,
    /// Size in bytes as reported by the platform
    #[serde(default)]
    pub file_size: u64,
    /// Mime type as reported by the platform
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "application/pdf".to_string()
}

impl RemoteFileDescriptor {
    /// Whether the display name ends in ".pdf", case-insensitively.
    pub fn is_pdf(&self) -> bool {
        self.file_name.to_lowercase().ends_with(".pdf")
    }
}

/// Request body for registering a remote file with the server.
///
/// Both top-level fields are required; a missing one fails JSON
/// deserialization and is reported as a 400 before any handler runs.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddFileRequest {
    /// Telegram user id the file belongs to
    pub user_id: i64,
    /// Descriptor of the platform-held file
    pub file_info: RemoteFileDescriptor,
}

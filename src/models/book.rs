//! Book listing DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// A single book visible to a user.
///
/// `file_id` is null for locally stored files and set for files held
/// by the platform (which are served through the streaming proxy).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookEntry {
    pub name: String,
    pub file_id: Option<String>,
}

/// Response for the book listing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<BookEntry>,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        StatusResponse { status: "success" }
    }
}

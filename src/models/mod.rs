//! Domain models for the book reader server.

pub mod book;
pub mod remote_file;

// Re-export commonly used types
pub use book::{BookEntry, BookListResponse, StatusResponse};
pub use remote_file::{AddFileRequest, RemoteFileDescriptor};

/// Optional user scope carried by listing and page requests.
#[derive(Debug, Clone, Copy, serde::Deserialize, utoipa::IntoParams)]
pub struct UserScope {
    /// Telegram user id; absent means the shared library
    pub user_id: Option<i64>,
}

//! Book listing and remote file registration handlers.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AddFileRequest, BookEntry, BookListResponse, StatusResponse, UserScope};
use crate::services::{FileRegistry, LibraryStore};

/// List the books visible to a user.
///
/// With a `user_id` the list comes from that user's remote file
/// registry (platform-held PDFs); without one it is the shared local
/// library. `file_id` is null for local entries.
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "Books",
    params(UserScope),
    responses(
        (status = 200, description = "Books visible to the requester", body = BookListResponse)
    )
)]
#[get("/books")]
pub async fn list_books(
    library: web::Data<LibraryStore>,
    registry: web::Data<FileRegistry>,
    query: web::Query<UserScope>,
) -> AppResult<HttpResponse> {
    let books = match query.user_id {
        Some(user_id) => registry
            .list_pdfs(user_id)
            .into_iter()
            .map(|f| BookEntry {
                name: f.file_name,
                file_id: Some(f.file_id),
            })
            .collect(),
        None => library
            .list(None)
            .into_iter()
            .map(|name| BookEntry {
                name,
                file_id: None,
            })
            .collect(),
    };

    Ok(HttpResponse::Ok().json(BookListResponse { books }))
}

/// Register a platform-held file for a user.
///
/// Called by the bot when a user sends a document. Registration is
/// idempotent by file handle.
#[utoipa::path(
    post,
    path = "/api/add-file",
    tag = "Books",
    request_body = AddFileRequest,
    responses(
        (status = 200, description = "File registered", body = StatusResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse)
    )
)]
#[post("/add-file")]
pub async fn add_file(
    registry: web::Data<FileRegistry>,
    payload: web::Json<AddFileRequest>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();

    if request.file_info.file_id.is_empty() || request.file_info.file_name.is_empty() {
        return Err(AppError::InvalidInput(
            "file_id and file_name must be non-empty".to_string(),
        ));
    }

    info!(
        user_id = request.user_id,
        file_name = %request.file_info.file_name,
        "Registering remote file"
    );
    registry.register(request.user_id, request.file_info)?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// Configure book API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_books).service(add_file);
}

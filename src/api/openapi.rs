//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Reader Server",
        version = "0.3.0",
        description = "Web backend for a Telegram PDF book reader: local library listing plus a streaming proxy for bot-held files"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health
        api::health::health,
        // Books
        api::books::list_books,
        api::books::add_file,
        // Streaming
        api::stream::stream_pdf,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            // Books
            models::BookEntry,
            models::BookListResponse,
            models::StatusResponse,
            models::RemoteFileDescriptor,
            models::AddFileRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Books", description = "Book listing, registration and streaming")
    )
)]
pub struct ApiDoc;

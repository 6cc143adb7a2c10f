//! Streaming endpoint: relays a platform-held PDF to the client.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::error::AppResult;
use crate::services::{TelegramStreamer, sanitize_filename};

/// Query parameters for the stream endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StreamQuery {
    /// Display name used for the Content-Disposition header
    pub filename: String,
}

/// Stream a platform-held PDF through the server.
///
/// The body is relayed chunk by chunk from the platform as it arrives;
/// peak memory per request is one chunk, not the file size. When the
/// client disconnects mid-stream, actix drops the body stream, which
/// closes the upstream connection.
#[utoipa::path(
    get,
    path = "/stream/{file_id}",
    tag = "Books",
    params(
        ("file_id" = String, Path, description = "Platform file handle"),
        StreamQuery
    ),
    responses(
        (status = 200, description = "PDF byte stream", content_type = "application/pdf"),
        (status = 404, description = "Platform does not know this handle", body = crate::error::ErrorResponse),
        (status = 500, description = "Missing configuration or relay failure", body = crate::error::ErrorResponse),
        (status = 504, description = "Upstream timed out", body = crate::error::ErrorResponse)
    )
)]
#[get("/stream/{file_id}")]
pub async fn stream_pdf(
    streamer: web::Data<TelegramStreamer>,
    path: web::Path<String>,
    query: web::Query<StreamQuery>,
) -> AppResult<HttpResponse> {
    let file_id = path.into_inner();
    let safe_name = sanitize_filename(&query.filename);

    debug!(file_id = %file_id, filename = %safe_name, "Stream requested");
    let body = streamer.stream(&file_id).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename={}", urlencoding::encode(&safe_name)),
        ))
        .streaming(body))
}

/// Configure stream routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(stream_pdf);
}

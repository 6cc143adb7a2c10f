//! Shared test helpers for the E2E suite.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use secrecy::SecretString;
use serde_json::Value;

use bookreader_lib::api;
use bookreader_lib::services::{FileRegistry, LibraryStore, TelegramStreamer};

use super::mock_telegram::TEST_TOKEN;

/// Write a placeholder PDF at the given path.
pub fn touch_pdf(path: &Path) {
    let mut file = File::create(path).unwrap();
    file.write_all(b"%PDF-1.4\n%%EOF\n").unwrap();
}

/// Create a temp library root seeded with shared files.
pub fn seed_library(shared: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in shared {
        touch_pdf(&dir.path().join(name));
    }
    fs::create_dir_all(dir.path().join("users")).unwrap();
    dir
}

/// Add a per-user file under the library root.
pub fn seed_user_file(library_root: &Path, user_id: i64, name: &str) {
    let user_dir = library_root.join("users").join(user_id.to_string());
    fs::create_dir_all(&user_dir).unwrap();
    touch_pdf(&user_dir.join(name));
}

/// Create a test app wired like the production server: book API, pages
/// and the streaming proxy, backed by the given library root and a
/// (mock) Telegram API base.
pub async fn create_test_app(
    library_root: &Path,
    telegram_base: &str,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let library = web::Data::new(LibraryStore::new(library_root));
    let registry = web::Data::new(FileRegistry::new(None));
    let streamer = web::Data::new(TelegramStreamer::new(
        telegram_base,
        Some(SecretString::from(TEST_TOKEN.to_string())),
    ));

    test::init_service(
        App::new()
            .app_data(library)
            .app_data(registry)
            .app_data(streamer)
            .service(
                web::scope("/api")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_book_routes),
            )
            .configure(api::configure_stream_routes)
            .configure(api::configure_page_routes),
    )
    .await
}

/// Register a remote file for a user via the API.
pub async fn register_file<S>(app: &S, user_id: i64, file_id: &str, file_name: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/add-file")
        .set_json(serde_json::json!({
            "user_id": user_id,
            "file_info": {
                "file_id": file_id,
                "file_name": file_name,
                "file_size": 2048,
                "mime_type": "application/pdf"
            }
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a JSON endpoint, returning (status, body).
pub async fn get_json<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

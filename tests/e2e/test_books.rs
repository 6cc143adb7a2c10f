//! E2E tests: book listing and remote file registration.

use actix_web::test;

use super::mock_telegram::MockTelegram;
use super::test_helpers::*;

/// Shared library listing: local files only, sorted case-insensitively,
/// with null file_id.
#[actix_rt::test]
async fn test_list_local_books_sorted() {
    let mock = MockTelegram::start();
    let library = seed_library(&["B.pdf", "a.pdf", "C.pdf", "notes.txt"]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    let (status, body) = get_json(&app, "/api/books").await;

    assert_eq!(status, 200);
    let books = body["books"].as_array().unwrap();
    let names: Vec<&str> = books.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["a.pdf", "B.pdf", "C.pdf"]);
    assert!(books.iter().all(|b| b["file_id"].is_null()));
}

/// Registration is idempotent and scoped per user.
#[actix_rt::test]
async fn test_register_and_list_remote_books() {
    let mock = MockTelegram::start();
    let library = seed_library(&[]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    let (status, body) = register_file(&app, 42, "h1", "x.pdf").await;
    assert_eq!(status, 200, "register should succeed: {:?}", body);
    assert_eq!(body["status"], "success");

    // Same handle again: no duplicate
    let (status, _) = register_file(&app, 42, "h1", "x.pdf").await;
    assert_eq!(status, 200);

    let (status, body) = get_json(&app, "/api/books?user_id=42").await;
    assert_eq!(status, 200);
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "x.pdf");
    assert_eq!(books[0]["file_id"], "h1");

    // Another user sees nothing
    let (status, body) = get_json(&app, "/api/books?user_id=43").await;
    assert_eq!(status, 200);
    assert!(body["books"].as_array().unwrap().is_empty());
}

/// Non-PDF registrations are kept but filtered out of the listing.
#[actix_rt::test]
async fn test_remote_listing_filters_non_pdfs() {
    let mock = MockTelegram::start();
    let library = seed_library(&[]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    register_file(&app, 42, "h1", "a.PDF").await;
    register_file(&app, 42, "h2", "b.epub").await;
    register_file(&app, 42, "h3", "c.Pdf").await;

    let (_, body) = get_json(&app, "/api/books?user_id=42").await;
    let ids: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["file_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["h1", "h3"]);
}

/// Missing top-level fields are a 400, before any registry mutation.
#[actix_rt::test]
async fn test_add_file_missing_fields_is_bad_request() {
    let mock = MockTelegram::start();
    let library = seed_library(&[]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    let req = test::TestRequest::post()
        .uri("/api/add-file")
        .set_json(serde_json::json!({ "user_id": 42 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::post()
        .uri("/api/add-file")
        .set_json(serde_json::json!({
            "file_info": { "file_id": "h1", "file_name": "x.pdf" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    // Empty handle is rejected by the handler itself
    let (status, _) = register_file(&app, 42, "", "x.pdf").await;
    assert_eq!(status, 400);

    let (_, body) = get_json(&app, "/api/books?user_id=42").await;
    assert!(body["books"].as_array().unwrap().is_empty());
}

/// Health endpoint answers under /api.
#[actix_rt::test]
async fn test_health() {
    let mock = MockTelegram::start();
    let library = seed_library(&[]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}

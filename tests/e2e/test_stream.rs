//! E2E tests: the remote streaming proxy, both directly and through the
//! HTTP surface.

use std::time::Duration;

use actix_web::test;
use futures_util::StreamExt;
use secrecy::SecretString;

use bookreader_lib::error::AppError;
use bookreader_lib::services::TelegramStreamer;

use super::mock_telegram::{
    FILE_BAD_FETCH, FILE_HTTP_ERROR, FILE_OK, FILE_SLOW, FILE_UNKNOWN, MockTelegram, PDF_BYTES,
    TEST_TOKEN,
};
use super::test_helpers::*;

fn streamer_for(mock: &MockTelegram) -> TelegramStreamer {
    TelegramStreamer::new(
        mock.base_url.clone(),
        Some(SecretString::from(TEST_TOKEN.to_string())),
    )
}

/// Happy path: handle resolves, bytes arrive unmodified.
#[actix_rt::test]
async fn test_stream_relays_bytes() {
    let mock = MockTelegram::start();
    let streamer = streamer_for(&mock);

    let mut stream = streamer.stream(FILE_OK).await.unwrap();
    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }

    assert_eq!(collected, PDF_BYTES);
    assert_eq!(mock.state.metadata_hits(), 1);
    assert_eq!(mock.state.content_hits(), 1);
}

/// An `ok: false` acknowledgment is NotFound, and the content endpoint
/// is never contacted.
#[actix_rt::test]
async fn test_unknown_handle_short_circuits() {
    let mock = MockTelegram::start();
    let streamer = streamer_for(&mock);

    let err = streamer.stream(FILE_UNKNOWN).await.err().unwrap();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(mock.state.metadata_hits(), 1);
    assert_eq!(mock.state.content_hits(), 0);
}

/// A transport-level getFile failure is also NotFound.
#[actix_rt::test]
async fn test_metadata_http_error_is_not_found() {
    let mock = MockTelegram::start();
    let streamer = streamer_for(&mock);

    let err = streamer.stream(FILE_HTTP_ERROR).await.err().unwrap();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(mock.state.content_hits(), 0);
}

/// A failing content fetch after successful resolution is a relay
/// error; no bytes are handed to the caller.
#[actix_rt::test]
async fn test_failed_content_fetch_is_relay_error() {
    let mock = MockTelegram::start();
    let streamer = streamer_for(&mock);

    let err = streamer.stream(FILE_BAD_FETCH).await.err().unwrap();
    assert!(matches!(err, AppError::Relay(_)));
    assert_eq!(mock.state.metadata_hits(), 1);
    assert_eq!(mock.state.content_hits(), 1);
}

/// A metadata call that exceeds its bound surfaces as a timeout.
#[actix_rt::test]
async fn test_slow_metadata_is_timeout() {
    let mock = MockTelegram::start();
    let streamer = TelegramStreamer::with_timeouts(
        mock.base_url.clone(),
        Some(SecretString::from(TEST_TOKEN.to_string())),
        Duration::from_secs(1),
        Duration::from_millis(300),
    );

    let err = streamer.stream(FILE_SLOW).await.err().unwrap();
    assert!(matches!(err, AppError::Timeout(_)));
}

/// Full HTTP round trip: register, then stream through the handler.
#[actix_rt::test]
async fn test_stream_endpoint_round_trip() {
    let mock = MockTelegram::start();
    let library = seed_library(&[]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    register_file(&app, 42, FILE_OK, "x.pdf").await;

    let req = test::TestRequest::get()
        .uri(&format!("/stream/{}?filename=x.pdf", FILE_OK))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "inline; filename=x.pdf"
    );

    let body = test::read_body(resp).await;
    assert_eq!(&body[..], PDF_BYTES);
}

/// Error kinds map to their HTTP statuses at the surface.
#[actix_rt::test]
async fn test_stream_endpoint_error_mapping() {
    let mock = MockTelegram::start();
    let library = seed_library(&[]);
    let app = create_test_app(library.path(), &mock.base_url).await;

    let req = test::TestRequest::get()
        .uri(&format!("/stream/{}?filename=x.pdf", FILE_UNKNOWN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let req = test::TestRequest::get()
        .uri(&format!("/stream/{}?filename=x.pdf", FILE_BAD_FETCH))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    // filename query is required
    let req = test::TestRequest::get()
        .uri(&format!("/stream/{}", FILE_OK))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

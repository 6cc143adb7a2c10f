//! Streaming proxy for files held by the Telegram Bot API.
//!
//! A file handle is resolved via `getFile` to a transient path, then the
//! content is relayed chunk by chunk to the caller. Resolved paths are
//! time-limited on the platform side and are never cached; every stream
//! request re-resolves. There are no retries here - a mid-stream failure
//! after bytes have been flushed downstream cannot be transparently
//! retried, so retry policy belongs to the client.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Bound on the metadata call and on gaps between content chunks.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bound on establishing either upstream connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Relayed byte chunks; finite, not restartable. Dropping the stream
/// closes the upstream connection, so a client disconnect releases the
/// platform socket promptly.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, AppError>> + Send>>;

/// `getFile` response envelope. Telegram reports application-level
/// failure as `ok: false` inside a 200, separately from HTTP errors.
#[derive(Debug, Deserialize)]
struct GetFileResponse {
    ok: bool,
    #[serde(default)]
    result: Option<GetFileResult>,
}

#[derive(Debug, Deserialize)]
struct GetFileResult {
    #[serde(default)]
    file_path: Option<String>,
}

/// Client for resolving and relaying platform-held files.
#[derive(Clone)]
pub struct TelegramStreamer {
    http: reqwest::Client,
    api_base: String,
    token: Option<SecretString>,
    request_timeout: Duration,
}

impl TelegramStreamer {
    /// Create a streamer against the given Bot API base URL.
    ///
    /// A `None` token is allowed at construction; every stream attempt
    /// then fails with a configuration error before any network call.
    pub fn new(api_base: impl Into<String>, token: Option<SecretString>) -> Self {
        Self::with_timeouts(api_base, token, CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    /// Create a streamer with explicit network timeouts.
    pub fn with_timeouts(
        api_base: impl Into<String>,
        token: Option<SecretString>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        // No whole-request timeout on the client: the relay phase may
        // legitimately outlive any fixed bound for large files. The
        // read timeout still catches a stalled upstream mid-stream.
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(request_timeout)
            .build()
            .expect("Failed to build Telegram HTTP client");

        TelegramStreamer {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
            request_timeout,
        }
    }

    /// Open a byte stream for a platform file handle.
    ///
    /// Resolves the handle via `getFile`, then issues a streaming GET
    /// against the file-serving endpoint and hands the chunks through
    /// as they arrive; nothing is buffered beyond a single chunk.
    ///
    /// Failure kinds:
    /// - `Configuration` when no bot token is set (checked first, no I/O)
    /// - `NotFound` when `getFile` answers non-2xx or `ok: false`
    /// - `Relay` when the content fetch fails after successful resolution
    /// - `Timeout` when either phase exceeds its bound
    pub async fn stream(&self, file_id: &str) -> AppResult<ByteStream> {
        let token = self.token.as_ref().ok_or_else(|| {
            AppError::Configuration("BOT_TOKEN is not set; cannot stream platform files".into())
        })?;

        let file_path = self.resolve_file_path(token, file_id).await?;
        debug!(file_id, "Resolved platform file, starting relay");

        // The transient path goes straight into the file-serving URL.
        // Both it and the token are sensitive; neither is ever logged.
        let content_url = format!(
            "{}/file/bot{}/{}",
            self.api_base,
            token.expose_secret(),
            file_path
        );

        let response = self
            .http
            .get(&content_url)
            .send()
            .await
            .map_err(map_fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Relay(format!(
                "platform file fetch returned HTTP {}",
                status
            )));
        }

        Ok(Box::pin(response.bytes_stream().map_err(map_fetch_error)))
    }

    /// Resolve a file handle to its transient platform path via `getFile`.
    async fn resolve_file_path(&self, token: &SecretString, file_id: &str) -> AppResult<String> {
        let url = format!("{}/bot{}/getFile", self.api_base, token.expose_secret());

        let response = self
            .http
            .get(&url)
            .query(&[("file_id", file_id)])
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(map_metadata_error)?;

        // Transport-level failure and an `ok: false` acknowledgment are
        // two different shapes of the same answer: the platform does not
        // know this handle.
        if !response.status().is_success() {
            debug!(file_id, status = %response.status(), "getFile returned an error status");
            return Err(AppError::NotFound(format!(
                "file '{}' on Telegram",
                file_id
            )));
        }

        let body: GetFileResponse = response
            .json()
            .await
            .map_err(|e| AppError::Relay(format!("unexpected getFile response: {}", e.without_url())))?;

        if !body.ok {
            debug!(file_id, "getFile acknowledged the request but reported failure");
            return Err(AppError::NotFound(format!(
                "file '{}' on Telegram",
                file_id
            )));
        }

        body.result
            .and_then(|r| r.file_path)
            .ok_or_else(|| AppError::NotFound(format!("file '{}' on Telegram", file_id)))
    }
}

/// Map a metadata-phase transport error. The error is stripped of its
/// URL before formatting: the URL embeds the bot token.
fn map_metadata_error(err: reqwest::Error) -> AppError {
    let err = err.without_url();
    if err.is_timeout() {
        AppError::Timeout(format!("getFile did not answer in time: {}", err))
    } else {
        AppError::Relay(format!("getFile request failed: {}", err))
    }
}

/// Map a content-phase transport error, also with the URL stripped.
fn map_fetch_error(err: reqwest::Error) -> AppError {
    let err = err.without_url();
    if err.is_timeout() {
        AppError::Timeout(format!("platform file fetch stalled: {}", err))
    } else {
        AppError::Relay(format!("platform file fetch failed: {}", err))
    }
}

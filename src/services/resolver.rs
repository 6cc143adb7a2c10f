//! View resolution: decide whether a book is served from the local
//! library or relayed from the platform.

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::library::{LibraryStore, has_pdf_extension, sanitize_filename};

/// Where the viewer should fetch the bytes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    /// Relay via the streaming proxy
    Remote { stream_url: String },
    /// Serve from the static /books mount
    Local { file_url: String },
}

impl ViewTarget {
    /// The URL the viewer shell should embed.
    pub fn url(&self) -> &str {
        match self {
            ViewTarget::Remote { stream_url } => stream_url,
            ViewTarget::Local { file_url } => file_url,
        }
    }
}

/// Resolve a view request to a local file URL or a remote stream URL.
///
/// The filename is sanitized to a bare basename before either branch
/// touches the filesystem or builds a URL. A present, non-empty
/// `file_id` together with a `user_id` always wins, even when a
/// same-named local file exists; there is no reconciliation between the
/// two tiers. The local fallback requires the resolved path to exist
/// and carry a ".pdf" extension, otherwise this fails with `NotFound`.
pub fn resolve_view(
    library: &LibraryStore,
    filename: &str,
    user_id: Option<i64>,
    file_id: Option<&str>,
) -> AppResult<ViewTarget> {
    let safe_name = sanitize_filename(filename);

    if let Some(handle) = file_id.filter(|id| !id.is_empty())
        && user_id.is_some()
    {
        let stream_url = format!(
            "/stream/{}?filename={}",
            urlencoding::encode(handle),
            urlencoding::encode(&safe_name)
        );
        debug!(filename = %safe_name, file_id = %handle, "Resolved view to remote stream");
        return Ok(ViewTarget::Remote { stream_url });
    }

    let path = library.resolve_path(&safe_name, user_id);
    if !path.is_file() || !has_pdf_extension(&path) {
        return Err(AppError::NotFound(format!("PDF '{}'", safe_name)));
    }

    let file_url = format!("/books/{}", urlencoding::encode(&safe_name));
    debug!(filename = %safe_name, "Resolved view to local file");
    Ok(ViewTarget::Local { file_url })
}

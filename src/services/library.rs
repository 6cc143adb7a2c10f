//! Local library store: PDF files on disk, partitioned by optional user scope.
//!
//! The directory tree is the source of truth; there is no index. Shared
//! books live directly under the library root, per-user books under
//! `<root>/users/<user_id>/`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Strip any directory components from an externally supplied filename.
///
/// Keeps only the final path segment, splitting on both `/` and `\` so a
/// Windows-style filename cannot smuggle separators past a Unix build.
/// Bare dot segments collapse to an empty string, which no file check
/// will ever match. This must run before any filesystem or URL-building
/// step that touches the name.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");
    match base {
        "" | "." | ".." => String::new(),
        name => name.to_string(),
    }
}

/// Whether the path has a ".pdf" extension, compared case-insensitively.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Filesystem-backed store for locally held PDFs.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    root: PathBuf,
}

impl LibraryStore {
    /// Create a store rooted at the given library directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LibraryStore { root: root.into() }
    }

    /// Per-user subtree root (`<root>/users`).
    pub fn users_root(&self) -> PathBuf {
        self.root.join("users")
    }

    fn user_dir(&self, user_id: i64) -> PathBuf {
        self.users_root().join(user_id.to_string())
    }

    /// List PDF filenames, non-recursively.
    ///
    /// With a `user_id` this looks only inside that user's subdirectory,
    /// otherwise the shared top-level directory. A missing directory is
    /// an empty listing, not an error. Results are sorted ascending,
    /// case-insensitively, so the order is stable across platforms.
    pub fn list(&self, user_id: Option<i64>) -> Vec<String> {
        let dir = match user_id {
            Some(id) => self.user_dir(id),
            None => self.root.clone(),
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut files: Vec<String> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                if !entry.file_type().ok()?.is_file() {
                    return None;
                }
                if !has_pdf_extension(&entry.path()) {
                    return None;
                }
                match entry.file_name().into_string() {
                    Ok(name) => Some(name),
                    Err(name) => {
                        warn!("Skipping non-UTF-8 filename in library: {:?}", name);
                        None
                    }
                }
            })
            .collect();

        files.sort_by_key(|name| name.to_lowercase());
        files
    }

    /// Resolve a filename to its on-disk path.
    ///
    /// The filename is sanitized to a bare basename first. If the user
    /// has a same-named file in their subdirectory, that wins; otherwise
    /// the shared directory path is returned. The returned path may not
    /// exist - existence is the caller's check.
    pub fn resolve_path(&self, filename: &str, user_id: Option<i64>) -> PathBuf {
        let safe_name = sanitize_filename(filename);

        if let Some(id) = user_id {
            let user_file = self.user_dir(id).join(&safe_name);
            if !safe_name.is_empty() && user_file.is_file() {
                return user_file;
            }
        }

        self.root.join(&safe_name)
    }
}

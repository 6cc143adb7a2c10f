//! HTML pages: the library index and the embedded PDF viewer shell.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::UserScope;
use crate::services::{LibraryStore, resolve_view, sanitize_filename};

/// Query parameters for the viewer page.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub user_id: Option<i64>,
    pub file_id: Option<String>,
}

/// Minimal HTML escaping for text and attribute positions.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_index(files: &[String], user_id: Option<i64>) -> String {
    let user_query = user_id
        .map(|id| format!("?user_id={}", id))
        .unwrap_or_default();

    let items: String = files
        .iter()
        .map(|name| {
            let encoded = urlencoding::encode(name);
            format!(
                "    <li><a href=\"/view/{}{}\">{}</a></li>\n",
                encoded,
                user_query,
                escape_html(name)
            )
        })
        .collect();

    let body = if files.is_empty() {
        "  <p>No books yet. Send a PDF to the bot to add one.</p>\n".to_string()
    } else {
        format!("  <ul>\n{}  </ul>\n", items)
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  \
         <title>Book Reader</title>\n  <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n<body>\n  <h1>Book Reader</h1>\n{}</body>\n</html>\n",
        body
    )
}

fn render_viewer(filename: &str, file_url: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  \
         <title>{title}</title>\n  <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n<body class=\"viewer\">\n  <header><a href=\"/\">&larr; Library</a> \
         <span>{title}</span></header>\n  \
         <embed src=\"{url}\" type=\"application/pdf\" width=\"100%\" height=\"100%\">\n\
         </body>\n</html>\n",
        title = escape_html(filename),
        url = escape_html(file_url),
    )
}

/// Library index page.
///
/// Lists the filenames available in the requester's local scope and
/// links each into the viewer. No pagination.
#[get("/")]
pub async fn index(
    library: web::Data<LibraryStore>,
    query: web::Query<UserScope>,
) -> HttpResponse {
    let files = library.list(query.user_id);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_index(&files, query.user_id))
}

/// Viewer page embedding either a local static URL or a proxied stream URL.
///
/// 404 if neither branch resolves.
#[get("/view/{filename}")]
pub async fn view_pdf(
    library: web::Data<LibraryStore>,
    path: web::Path<String>,
    query: web::Query<ViewQuery>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    let safe_name = sanitize_filename(&filename);

    let target = resolve_view(
        library.get_ref(),
        &filename,
        query.user_id,
        query.file_id.as_deref(),
    )?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_viewer(&safe_name, target.url())))
}

/// Configure page routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(view_pdf);
}

//! Static asset serving and HTML shell pages.
//!
//! `/` and `/listing/{id}` both serve shell pages; the browser client
//! routes and hydrates them itself.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::fs;
use tracing::warn;

use crate::state::AppState;

/// Create the static files router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index_page))
        .route("/listing/{id}", get(listing_page))
        .route("/static/{*path}", get(serve_static))
}

/// GET / — front shell page.
async fn index_page(State(state): State<AppState>) -> Response {
    serve_shell(&state, "index.html").await
}

/// GET /listing/{id} — detail shell page (client-side routed).
async fn listing_page(State(state): State<AppState>, Path(_id): Path<String>) -> Response {
    serve_shell(&state, "listing.html").await
}

/// Serve a shell page from the static directory.
async fn serve_shell(state: &AppState, name: &str) -> Response {
    let path = state.static_dir().join(name);
    match fs::read_to_string(&path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read shell page");
            not_found()
        }
    }
}

/// Serve a static file.
async fn serve_static(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    // Security: prevent path traversal
    let path = path.trim_start_matches('/');
    if path.contains("..") || path.contains('\0') {
        return not_found();
    }

    let file_path = state.static_dir().join(path);

    let content = match fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %file_path.display(), error = %e, "failed to read static file");
            }
            return not_found();
        }
    };

    (
        [
            (header::CONTENT_TYPE, mime_from_path(&file_path)),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        content,
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn mime_from_path(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

//! Route handlers

use super::AppState;
use super::store::{AddOutcome, RemoveOutcome};
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{error, warn};

fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, body.into()).into_response()
}

fn not_found() -> Response {
    text(StatusCode::NOT_FOUND, "File not found")
}

fn internal_error(err: &std::io::Error) -> Response {
    error!(error = %err, "word list write failed");
    text(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

pub(crate) async fn status() -> &'static str {
    "OK"
}

pub(crate) async fn random_word(State(state): State<Arc<AppState>>) -> Response {
    match state.words.random_word().await {
        Some(word) => text(StatusCode::OK, word),
        None => {
            warn!("word requested but the list is empty");
            text(StatusCode::SERVICE_UNAVAILABLE, "No words available")
        }
    }
}

pub(crate) async fn word_list(State(state): State<Arc<AppState>>) -> Response {
    match state.words.read_file().await {
        Ok(contents) => (
            [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))],
            contents,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "File read error");
            not_found()
        }
    }
}

pub(crate) async fn add_words(State(state): State<Arc<AppState>>, body: String) -> Response {
    match state.words.add(&body).await {
        Ok(AddOutcome::Added(words)) => text(
            StatusCode::CREATED,
            format!("Added {} word(s)\n{}\n", words.len(), words.join("\n")),
        ),
        Ok(AddOutcome::EmptyBody) => text(StatusCode::UNPROCESSABLE_ENTITY, "Empty body"),
        Ok(AddOutcome::NoValidWords) => text(
            StatusCode::BAD_REQUEST,
            "No valid five-letter words in body",
        ),
        Ok(AddOutcome::AllDuplicates) => text(StatusCode::CONFLICT, "All words already listed"),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn remove_word(State(state): State<Arc<AppState>>, body: String) -> Response {
    match state.words.remove(&body).await {
        Ok(RemoveOutcome::Removed(count)) => text(StatusCode::OK, format!("Removed {count}")),
        Ok(RemoveOutcome::InvalidWord) => text(StatusCode::BAD_REQUEST, "Word must be alphabetic"),
        Err(err) => internal_error(&err),
    }
}

/// Serve a file from the public root; `/` maps to `index.html`
pub(crate) async fn static_file(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return not_found();
    }
    let Some(relative) = public_path(uri.path()) else {
        warn!(path = uri.path(), "rejected static path");
        return not_found();
    };

    let path = state.public_root.join(&relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, HeaderValue::from_static(content_type(&relative)))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            error!(path = %path.display(), error = %err, "File serve error");
            not_found()
        }
    }
}

/// Relative file path for a request path, refusing anything that escapes the root
fn public_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(PathBuf::from("index.html"));
    }
    if trimmed.contains('\\') {
        return None;
    }

    let relative = Path::new(trimmed);
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
        .then(|| relative.to_path_buf())
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json" | "webmanifest") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

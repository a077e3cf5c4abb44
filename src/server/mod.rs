//! Word server
//!
//! Routes:
//! - `GET /status`: liveness, always "OK"
//! - `GET /word`: one random word from the list
//! - `GET /wordlist`: the word list file as text
//! - `POST /add`: append new five-letter words (newline-separated body)
//! - `POST /remove`: remove one word, ignoring case
//! - anything else: static files under the public root

mod handlers;
pub mod store;

pub use store::{AddOutcome, RemoveOutcome, WordStore};

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{Instrument, info};

/// Shared server state
#[derive(Debug)]
pub struct AppState {
    pub words: WordStore,
    pub public_root: PathBuf,
}

impl AppState {
    /// Load the word list and remember the public root
    ///
    /// # Errors
    ///
    /// Returns an error if the word list file cannot be read.
    pub async fn load(config: &ServerConfig) -> Result<Self> {
        let words = WordStore::open(&config.wordlist)
            .await
            .with_context(|| format!("failed to read word list {}", config.wordlist.display()))?;

        Ok(Self {
            words,
            public_root: config.public_root.clone(),
        })
    }
}

/// Build the router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(handlers::status))
        .route("/word", get(handlers::random_word))
        .route("/wordlist", get(handlers::word_list))
        .route("/add", post(handlers::add_words))
        .route("/remove", post(handlers::remove_word))
        .fallback(handlers::static_file)
        .layer(middleware::from_fn(request_tracing))
        .with_state(state)
}

async fn request_tracing(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, path = %path);

    let started = Instant::now();
    let response = next.run(request).instrument(span).await;
    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request served"
    );
    response
}

/// Serve on an already bound listener until the future is dropped or fails
///
/// # Errors
///
/// Returns an error if the server stops with an I/O error.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Bind the configured port and serve
///
/// # Errors
///
/// Returns an error if the word list cannot be read or the port cannot be bound.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::load(config).await?);
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    serve_on(listener, state).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    } else {
        // No signal handler available: run until the process is killed
        std::future::pending::<()>().await;
    }
}

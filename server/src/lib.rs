//! In-memory Todo-Backend server.
//!
//! # Overview
//! Serves an ordered list of todos over a small JSON API rooted at `/`:
//! `GET`/`POST`/`DELETE /` list, create and clear; `GET`/`PATCH`/`DELETE
//! /{id}` fetch, partially update and delete. Every successful call answers
//! `200`, JSON bodies are `application/json; charset=utf-8`, and each todo
//! carries the absolute `url` it can be fetched from.
//!
//! # Design
//! - One [`TodoStore`] per router, handed to handlers through axum `State`.
//! - Handlers stay thin; validation lives in the extractors and the merge
//!   rules live on [`model::Todo`].
//! - CORS is wide open so browser-based runners can drive the API.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod json;
pub mod model;
pub mod store;

use std::future::Future;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use model::{Todo, TodoFields, TodoId};
pub use store::TodoStore;

/// Shared state behind every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: TodoStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: TodoStore::new(),
            config: Arc::new(config),
        }
    }
}

/// Router over a fresh, empty store.
pub fn app(config: Config) -> Router {
    router(AppState::new(config))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .delete(handlers::clear_todos),
        )
        .route(
            "/{id}",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, config: Config, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(config))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Serve until Ctrl-C.
pub async fn run(listener: TcpListener, config: Config) -> std::io::Result<()> {
    serve(listener, config, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

//! Router assembly and the listen loop for the task API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{self, SharedStore};
use crate::store::MemoryStore;

pub const DEFAULT_PORT: u16 = 3000;

/// Builds the application router over the given store. Split out from [`run`]
/// so tests can drive the router in-process.
pub fn app(store: SharedStore) -> Router {
    // The browser client may be served from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/tasks",
            get(routes::list_tasks).post(routes::create_task),
        )
        .route(
            "/api/tasks/{id}",
            put(routes::update_task).delete(routes::delete_task),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Binds the listener and serves the API until the process is stopped.
pub async fn run(port: u16) -> anyhow::Result<()> {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("task API listening on http://{addr}");
    axum::serve(listener, app(store)).await?;
    Ok(())
}

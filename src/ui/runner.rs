//! Router construction and server entry point.

use std::{path::Path, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    domain::ServerError,
    ui::{
        handler::{get_rooms, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the router: the WebSocket relay endpoint, the small HTTP API,
/// and the static client assets at the root path.
pub fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new());
    let router = app(state, &config.static_dir);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(ServerError::Bind)?;
    tracing::info!(
        "listening on {} (static assets from {})",
        addr,
        config.static_dir.display()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

//! `api` crate — HTTP surface of the action-router boundary.
//!
//! Exposes:
//!   POST   /api/v1/watches
//!   GET    /api/v1/watches/{did}/apps
//!   POST   /api/v1/watches/{did}/location
//!   POST   /api/v1/watches/{did}/steps
//!   POST   /api/v1/watches/{did}/heartrate
//!   GET    /api/v1/apps/{aid}/watches
//!   POST   /api/v1/apps/{aid}/watches
//!   DELETE /api/v1/apps/{aid}/watches/{did}
//!
//! Handlers are deliberately thin: decode the request, call one typed
//! operation from the `commands` crate, translate the error. Device
//! business actions (geofencing, schedules) live outside this workspace
//! and cross the same `commands::ops` boundary.

mod handlers;

use axum::routing::{delete, get, post};
use axum::Router;
use commands::CommandExecutor;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub executor: CommandExecutor,
}

/// Build the full application router.
pub fn router(executor: CommandExecutor) -> Router {
    let state = AppState { executor };
    Router::new()
        .route("/api/v1/watches", post(handlers::devices::register))
        .route("/api/v1/watches/{did}/apps", get(handlers::devices::app_ids))
        .route("/api/v1/watches/{did}/location", post(handlers::telemetry::location))
        .route("/api/v1/watches/{did}/steps", post(handlers::telemetry::steps))
        .route("/api/v1/watches/{did}/heartrate", post(handlers::telemetry::heart_rate))
        .route(
            "/api/v1/apps/{aid}/watches",
            get(handlers::bindings::watch_ids).post(handlers::bindings::bind),
        )
        .route("/api/v1/apps/{aid}/watches/{did}", delete(handlers::bindings::unbind))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve until the process is stopped.
pub async fn serve(bind: &str, executor: CommandExecutor) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("listening on {bind}");
    axum::serve(listener, router(executor)).await
}

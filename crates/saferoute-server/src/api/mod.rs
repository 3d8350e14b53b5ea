//! HTTP API for the SafeRoute server.

pub mod request_id;
mod routes;

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use routes::{ApiError, PlanRouteRequest};

/// Full application router with middleware applied.
pub fn app(state: Arc<AppState>) -> Router {
    routes::create_router()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::ensure_request_id))
        .layer(CorsLayer::permissive())
}

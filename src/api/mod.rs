//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod extract;
pub mod handlers;
pub mod responses;

use std::{path::Path, sync::Arc};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints.
///
/// Paths not matched by an endpoint are served from `doc_root`.
pub fn create_router(state: Arc<AppState>, doc_root: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/session", post(session_handler))
        .route("/api/send-code", post(send_code_handler))
        .route("/api/countdown", get(countdown_handler))
        .route("/api/countdown/events", get(countdown_events_handler))
        .route("/api/verify", post(verify_handler))
        .route("/api/home", get(home_api_handler))
        .route("/home", get(home_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .fallback_service(ServeDir::new(doc_root))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - `POST /upload` multipart image upload
//! - `GET /health`
//! - Plain-text error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use imgdrop_core::upload::ImageUploadService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload validation and storage service.
    pub uploads: Arc<ImageUploadService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState, max_request_bytes: usize) -> Router {
    Router::new()
        .merge(routes::api_routes(max_request_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

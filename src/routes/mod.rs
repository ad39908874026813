//! API Routes
//!
//! HTTP endpoints for the application:
//! - `GET /health` - Liveness check
//! - `POST /upload` - Multipart document ingestion
//! - `POST /run` - Retrieval-augmented answer generation

pub mod health;
pub mod run;
pub mod upload;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(health::router())
        .merge(upload::router(state.clone()))
        .merge(run::router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

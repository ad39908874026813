use axum::{routing::get, Json, Router};

use crate::models::HealthResponse;

pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

//! Retrieval-augmented answer endpoint.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use tracing::{debug, info};

use crate::models::{AppState, RunRequest, RunResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new().route("/run", post(run)).with_state(state)
}

async fn run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> AppResult<Json<RunResponse>> {
    let query = request
        .messages
        .last()
        .map(|m| m.content.clone())
        .ok_or_else(|| AppError::InvalidRequest("messages must not be empty".to_string()))?;

    let llm_options = &request.workflow.configs.llm;
    let top_k = request.workflow.configs.kb.top_k();

    info!(top_k, use_web = llm_options.use_web, "Running answer pipeline");

    let assembled = state
        .assembler
        .assemble(&query, llm_options.prompt(), top_k, llm_options.use_web)
        .await;
    debug!(retrieval = ?assembled.retrieval, web = ?assembled.web, "Context assembled");

    let reply = state
        .generator
        .generate(&assembled.system_prompt, &request.messages)
        .await?;

    Ok(Json(RunResponse { reply }))
}

//! Document ingestion: persist, extract, chunk, index.

use axum::extract::{Multipart, State};
use axum::{routing::post, Json, Router};
use tracing::{info, warn};

use crate::chunker::build_chunks;
use crate::extract::extract_text;
use crate::models::{AppState, UploadResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .with_state(state)
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut indexed_chunks = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    {
        let filename = field
            .file_name()
            .unwrap_or("upload.pdf")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

        indexed_chunks += ingest_document(&state, &filename, &bytes).await?;
    }

    info!(indexed_chunks, "Upload complete");
    Ok(Json(UploadResponse { indexed_chunks }))
}

/// Ingest one uploaded file; returns the number of chunks indexed.
///
/// The file is persisted before extraction is attempted. An unextractable
/// file degrades to empty text and contributes zero chunks instead of
/// failing the request.
pub async fn ingest_document(state: &AppState, filename: &str, bytes: &[u8]) -> AppResult<usize> {
    let stored = state.docs.save(filename, bytes).await?;

    let text = match extract_text(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(file = %stored.filename, error = %e, "Extraction failed, indexing nothing for this file");
            String::new()
        }
    };

    let chunks = build_chunks(&text, state.config.storage.chunk_size, &stored.filename);
    let added = state.index.add(chunks).await?;

    info!(file = %stored.filename, chunks = added, "Ingested document");
    Ok(added)
}

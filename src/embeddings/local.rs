//! Local embedding fallback via fastembed.
//!
//! Selected when no provider key is configured. The model is downloaded on
//! first use and cached; after that, embedding runs entirely offline.

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::types::{AppError, AppResult};

use super::Embedder;

const MODEL_NAME: &str = "all-minilm-l6-v2";

pub struct LocalEmbedder {
    model_name: String,
}

impl LocalEmbedder {
    pub fn new() -> Self {
        Self {
            model_name: MODEL_NAME.to_string(),
        }
    }
}

impl Default for LocalEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn embed(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = TextEmbedding::try_new(
                InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
            )
            .map_err(|e| AppError::Embedding(format!("failed to initialize local model: {}", e)))?;

            model
                .embed(texts, None)
                .map_err(|e| AppError::Embedding(format!("local embedding failed: {}", e)))
        })
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?
    }
}

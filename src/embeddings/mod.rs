//! Embedding provider abstraction and selection.
//!
//! The provider is chosen once at startup by [`create_embedder`]: the OpenAI
//! API when `EMBED_PROVIDER=openai` and a key is configured, otherwise the
//! local model. The chosen embedder is handed to the vector index for its
//! whole lifetime; mixing embedding spaces within one index silently
//! corrupts similarity comparisons, so there is no re-selection per call.

pub mod openai;

#[cfg(feature = "local-embeddings")]
pub mod local;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::EmbeddingConfig;
use crate::types::AppResult;

/// Interface every embedding backend implements.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// The model identifier (e.g. `"text-embedding-3-small"`).
    fn model_name(&self) -> &str;

    /// Embed a batch of texts, returning one vector per input in order.
    async fn embed(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;
}

/// Resolve the embedding backend from configuration.
///
/// Called exactly once, at process startup.
pub fn create_embedder(config: &EmbeddingConfig) -> AppResult<Arc<dyn Embedder>> {
    if config.provider == "openai" && !config.api_key.is_empty() {
        let embedder = openai::OpenAiEmbedder::new(config)?;
        info!(model = embedder.model_name(), "Using OpenAI embeddings");
        return Ok(Arc::new(embedder));
    }

    local_fallback()
}

#[cfg(feature = "local-embeddings")]
fn local_fallback() -> AppResult<Arc<dyn Embedder>> {
    let embedder = local::LocalEmbedder::new();
    info!(model = embedder.model_name(), "Using local embeddings");
    Ok(Arc::new(embedder))
}

#[cfg(not(feature = "local-embeddings"))]
fn local_fallback() -> AppResult<Arc<dyn Embedder>> {
    Err(crate::types::AppError::Embedding(
        "no embedding provider key configured and local-embeddings feature is disabled"
            .to_string(),
    ))
}

/// Cosine similarity between two embedding vectors.
///
/// Returns `0.0` for empty vectors or vectors of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }
}

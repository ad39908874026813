//! In-process vector index over document chunks.
//!
//! Brute-force cosine similarity over all stored vectors behind a
//! `std::sync::RwLock`. Entries are appended as a whole batch under one
//! write lock, so concurrent readers observe either the pre-add or the
//! post-add state, never a torn entry.
//!
//! The index owns its embedder for its entire lifetime: queries are embedded
//! in the same space as the stored chunks. Constructing a second index with
//! a different embedder is the only supported way to change models.

use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::chunker::Chunk;
use crate::embeddings::{cosine_similarity, Embedder};
use crate::types::AppResult;

struct IndexEntry {
    id: Uuid,
    text: String,
    source: String,
    vector: Vec<f32>,
}

/// A query hit: the stored chunk plus its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub id: Uuid,
    pub text: String,
    pub source: String,
    pub score: f32,
}

pub struct VectorIndex {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<Vec<IndexEntry>>,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// The model this index embeds with, fixed at construction.
    pub fn embedding_model(&self) -> &str {
        self.embedder.model_name()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Embed and store a batch of chunks. An empty batch is a no-op.
    ///
    /// Returns the number of entries added.
    pub async fn add(&self, chunks: Vec<Chunk>) -> AppResult<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(crate::types::AppError::Embedding(format!(
                "provider returned {} vectors for {} inputs",
                vectors.len(),
                chunks.len()
            )));
        }

        let count = chunks.len();
        let mut entries = self.entries.write().unwrap();
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            entries.push(IndexEntry {
                id: chunk.id,
                text: chunk.text,
                source: chunk.source,
                vector,
            });
        }

        Ok(count)
    }

    /// Return up to `top_k` entries most similar to `text`, best first.
    ///
    /// An empty index yields an empty result set without touching the
    /// embedding provider.
    pub async fn query(&self, text: &str, top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        if top_k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let query_texts = [text.to_string()];
        let query_vec = self
            .embedder
            .embed(&query_texts)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        let entries = self.entries.read().unwrap();
        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .map(|e| ScoredChunk {
                id: e.id,
                text: e.text.clone(),
                source: e.source.clone(),
                score: cosine_similarity(&query_vec, &e.vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}

//! OpenAI embeddings API client.
//!
//! Retry strategy for transient failures:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::types::{AppError, AppResult};

use super::Embedder;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_retries: u32,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Embedding(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Override the API base URL (mock servers in tests, compatible gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .client
                .post(format!("{}/embeddings", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let parsed: EmbeddingResponse = response
                            .json()
                            .await
                            .map_err(|e| AppError::Embedding(e.to_string()))?;
                        return Ok(parsed.data.into_iter().map(|d| d.embedding).collect());
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    if status.as_u16() == 429 || status.is_server_error() {
                        last_err = Some(AppError::Embedding(format!(
                            "OpenAI API error {}: {}",
                            status, body_text
                        )));
                        continue;
                    }

                    return Err(AppError::Embedding(format!(
                        "OpenAI API error {}: {}",
                        status, body_text
                    )));
                }
                Err(e) => {
                    last_err = Some(AppError::Embedding(e.to_string()));
                    continue;
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| AppError::Embedding("embedding failed after retries".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(max_retries: u32) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: "openai".to_string(),
            api_key: "test-key".to_string(),
            model: "text-embedding-3-small".to_string(),
            timeout_secs: 5,
            max_retries,
        }
    }

    #[tokio::test]
    async fn parses_embeddings_in_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [
                    {"embedding": [0.1, 0.2], "index": 0},
                    {"embedding": [0.3, 0.4], "index": 1}
                ]}"#,
            )
            .create_async()
            .await;

        let embedder = OpenAiEmbedder::new(&test_config(0))
            .unwrap()
            .with_base_url(server.url());

        let vectors = embedder
            .embed(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[tokio::test]
    async fn client_errors_fail_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .with_status(401)
            .with_body(r#"{"error": "bad key"}"#)
            .expect(1)
            .create_async()
            .await;

        let embedder = OpenAiEmbedder::new(&test_config(3))
            .unwrap()
            .with_base_url(server.url());

        let err = embedder.embed(&["text".to_string()]).await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(err, AppError::Embedding(_)));
    }

    #[tokio::test]
    async fn server_errors_are_retried() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("POST", "/embeddings")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        let succeeding = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"embedding": [1.0], "index": 0}]}"#)
            .create_async()
            .await;

        let embedder = OpenAiEmbedder::new(&test_config(1))
            .unwrap()
            .with_base_url(server.url());

        let vectors = embedder.embed(&["text".to_string()]).await.unwrap();
        failing.assert_async().await;
        succeeding.assert_async().await;
        assert_eq!(vectors, vec![vec![1.0]]);
    }
}

//! OpenAI chat-completion adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::llm::provider::ChatAdapter;
use crate::types::{AppError, AppResult, ChatMessage};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAiChatAdapter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatAdapter {
    pub fn new(config: &LlmConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::LlmApi(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: config.model.clone(),
        })
    }

    /// Override the API base URL (mock servers in tests, compatible gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ChatAdapter for OpenAiChatAdapter {
    async fn chat(&self, system: &str, messages: &[ChatMessage]) -> AppResult<String> {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(WireMessage {
            role: "system",
            content: system,
        });
        for m in messages {
            wire.push(WireMessage {
                role: &m.role,
                content: &m.content,
            });
        }

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: wire,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(AppError::LlmApi(format!("{}: {}", status, body_text)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmApi(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig {
            provider: "openai".to_string(),
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"model": "gpt-4o-mini", "messages": [{"role": "system", "content": "be brief"}]}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "hi there"}}]}"#)
            .create_async()
            .await;

        let adapter = OpenAiChatAdapter::new(&test_config())
            .unwrap()
            .with_base_url(server.url());

        let reply = adapter
            .chat("be brief", &[ChatMessage::user("hello")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let adapter = OpenAiChatAdapter::new(&test_config())
            .unwrap()
            .with_base_url(server.url());

        let err = adapter
            .chat("system", &[ChatMessage::user("hello")])
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, AppError::LlmApi(_)));
    }
}

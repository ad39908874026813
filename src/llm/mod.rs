// LLM abstraction layer

pub mod openai;
pub mod provider;

pub use provider::*;

use std::sync::Arc;
use tracing::info;

use crate::config::LlmConfig;
use crate::types::{AppResult, ChatMessage};

/// Prefix of the deterministic reply used when no provider is configured.
pub const FALLBACK_PREFIX: &str = "LLM not configured. Echo: ";

/// Produces the final reply for a run request.
///
/// With a configured provider, the assembled system prompt plus the full
/// conversation goes out as one chat request and provider errors surface to
/// the caller. Without one, the generator echoes the last message behind a
/// fixed prefix, which keeps the whole pipeline black-box testable.
#[derive(Clone)]
pub struct AnswerGenerator {
    adapter: Option<Arc<dyn ChatAdapter>>,
}

impl AnswerGenerator {
    pub fn from_config(config: &LlmConfig) -> AppResult<Self> {
        if config.provider == "openai" && !config.api_key.is_empty() {
            let adapter = openai::OpenAiChatAdapter::new(config)?;
            info!(model = %config.model, "Using OpenAI chat completions");
            return Ok(Self {
                adapter: Some(Arc::new(adapter)),
            });
        }

        info!("No LLM credential configured, replies fall back to echo");
        Ok(Self { adapter: None })
    }

    /// A generator with no provider; replies use the echo fallback.
    pub fn disabled() -> Self {
        Self { adapter: None }
    }

    pub fn with_adapter(adapter: Arc<dyn ChatAdapter>) -> Self {
        Self {
            adapter: Some(adapter),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.adapter.is_some()
    }

    /// Generate a reply from the system prompt and conversation history.
    pub async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> AppResult<String> {
        match &self.adapter {
            Some(adapter) => adapter.chat(system_prompt, messages).await,
            None => {
                let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
                Ok(format!("{FALLBACK_PREFIX}{last}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fallback_echoes_last_message() {
        let generator = AnswerGenerator::disabled();
        let messages = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("reply"),
            ChatMessage::user("hello"),
        ];

        let reply = generator.generate("system", &messages).await.unwrap();
        assert_eq!(reply, "LLM not configured. Echo: hello");
    }

    #[tokio::test]
    async fn fallback_with_no_messages_is_bare_prefix() {
        let generator = AnswerGenerator::disabled();
        let reply = generator.generate("system", &[]).await.unwrap();
        assert_eq!(reply, FALLBACK_PREFIX);
    }

    #[tokio::test]
    async fn missing_credential_selects_fallback() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 5,
        };
        let generator = AnswerGenerator::from_config(&config).unwrap();
        assert!(!generator.is_configured());
    }

    fn mock_backed_generator(server: &mockito::Server) -> AnswerGenerator {
        let config = LlmConfig {
            provider: "openai".to_string(),
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 5,
        };
        let adapter = openai::OpenAiChatAdapter::new(&config)
            .unwrap()
            .with_base_url(server.url());
        AnswerGenerator::with_adapter(Arc::new(adapter))
    }

    #[tokio::test]
    async fn configured_generator_returns_the_completion() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "an answer"}}]}"#)
            .create_async()
            .await;

        let generator = mock_backed_generator(&server);
        assert!(generator.is_configured());

        let reply = generator
            .generate("system", &[ChatMessage::user("hello")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "an answer");
    }

    #[tokio::test]
    async fn provider_error_propagates_through_generate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let generator = mock_backed_generator(&server);
        let err = generator
            .generate("system", &[ChatMessage::user("hello")])
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, crate::types::AppError::LlmApi(_)));
    }
}

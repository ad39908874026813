use async_trait::async_trait;

use crate::types::{AppResult, ChatMessage};

/// Seam between the answer generator and a chat-completion backend.
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    /// Send one chat request: the system prompt followed by the ordered
    /// conversation. Returns the textual completion.
    async fn chat(&self, system: &str, messages: &[ChatMessage]) -> AppResult<String>;
}

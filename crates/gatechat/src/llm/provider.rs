//! LLM provider trait.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::LLMError;
use super::types::Message;

/// Literal returned by [`LLMProvider::send`] when a call fails.
pub const FAILURE_SENTINEL: &str = "[]";

/// Trait for chat completion backends.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send a conversation and return the assistant's reply text.
    async fn chat(&self, messages: Vec<Message>) -> Result<String, LLMError>;

    /// Like [`chat`](Self::chat), but every failure collapses into
    /// [`FAILURE_SENTINEL`]. A reply whose text is literally `[]` cannot be
    /// told apart from a failure; use `chat` when that matters.
    async fn send(&self, messages: Vec<Message>) -> String {
        match self.chat(messages).await {
            Ok(content) => content,
            // Rejections are already logged with status and body by the provider.
            Err(e @ LLMError::Api { .. }) => {
                debug!(error = %e, "Chat request rejected, returning sentinel");
                FAILURE_SENTINEL.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed, returning sentinel");
                FAILURE_SENTINEL.to_string()
            }
        }
    }
}

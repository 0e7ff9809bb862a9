use crate::domain::chat::ChatMessage;
use crate::domain::shared::VendorError;
use async_trait::async_trait;

/// Repository for chat-completion calls against the LLM vendor
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Run one completion and return the first choice's text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, VendorError>;
}

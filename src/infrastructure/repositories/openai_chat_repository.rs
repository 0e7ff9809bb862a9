use super::chat_repository::ChatRepository;
use super::openai_client::map_openai_error;
use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::shared::{with_deadline, VendorError};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

const TEMPERATURE: f32 = 0.4;

/// OpenAI chat-completions implementation of the chat repository
pub struct OpenAiChatRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
}

impl OpenAiChatRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    fn to_request_message(
        message: &ChatMessage,
    ) -> Result<ChatCompletionRequestMessage, OpenAIError> {
        let request_message: ChatCompletionRequestMessage = match message.role {
            ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.clone())
                .build()?
                .into(),
            ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.clone())
                .build()?
                .into(),
        };
        Ok(request_message)
    }

    async fn call_openai(&self, messages: &[ChatMessage]) -> Result<String, VendorError> {
        let request_messages = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_openai_error)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(request_messages)
            .temperature(TEMPERATURE)
            .build()
            .map_err(map_openai_error)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "OpenAI chat completion failed");
            map_openai_error(e)
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VendorError::InvalidResponse("completion had no content".to_string()))
    }
}

#[async_trait]
impl ChatRepository for OpenAiChatRepository {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, VendorError> {
        let start_time = Instant::now();

        let content = with_deadline(self.timeout, self.call_openai(messages)).await?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            message_count = messages.len(),
            latency_ms = start_time.elapsed().as_millis(),
            answer_length = content.len(),
            "Chat completion finished"
        );

        Ok(content)
    }
}

use crate::domain::shared::VendorError;
use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::time::Duration;

/// Build the shared OpenAI client used by the chat, speech and transcription repositories.
/// Rate-limit responses surface as errors on the first attempt.
pub fn build_openai_client(api_key: &str, api_base: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(api_base.trim_end_matches('/'));
    Client::with_config(config).with_backoff(no_retry())
}

fn no_retry() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

pub fn map_openai_error(err: OpenAIError) -> VendorError {
    match err {
        OpenAIError::ApiError(api) => VendorError::Api(api.message),
        OpenAIError::JSONDeserialize(e) => VendorError::InvalidResponse(e.to_string()),
        OpenAIError::Reqwest(e) => VendorError::Transport(e.to_string()),
        other => VendorError::Transport(other.to_string()),
    }
}

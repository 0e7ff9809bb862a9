use super::openai_client::map_openai_error;
use super::stt_repository::SttRepository;
use crate::domain::shared::{with_deadline, VendorError};
use async_openai::{
    config::OpenAIConfig,
    types::{AudioInput, CreateTranscriptionRequestArgs},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// OpenAI Whisper implementation of the transcription repository
pub struct OpenAiSttRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
}

impl OpenAiSttRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }
}

#[async_trait]
impl SttRepository for OpenAiSttRepository {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
        language: Option<&str>,
    ) -> Result<String, VendorError> {
        let start_time = Instant::now();
        let audio_size = audio.len();

        let mut args = CreateTranscriptionRequestArgs::default();
        args.file(AudioInput::from_vec_u8(filename.to_string(), audio))
            .model(self.model.clone());
        if let Some(language) = language {
            args.language(language.to_string());
        }
        let request = args.build().map_err(map_openai_error)?;

        let response = with_deadline(self.timeout, async {
            self.client
                .audio()
                .transcribe(request)
                .await
                .map_err(map_openai_error)
        })
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                audio_size_bytes = audio_size,
                "OpenAI transcription failed"
            );
            e
        })?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_size,
            text_length = response.text.len(),
            "Transcription completed"
        );

        Ok(response.text)
    }
}

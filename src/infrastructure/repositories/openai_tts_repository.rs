use super::openai_client::map_openai_error;
use super::tts_repository::TtsRepository;
use crate::domain::shared::{with_deadline, VendorError};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("sentence pattern compiles"));

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    fn parse_voice(voice: &str) -> Voice {
        match voice.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            other => {
                tracing::warn!(voice = other, "Unknown OpenAI voice, falling back to alloy");
                Voice::Alloy
            }
        }
    }

    fn parse_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    /// Call OpenAI TTS API to synthesize a single text batch
    async fn call_openai(&self, text: &str, voice: &str) -> Result<Vec<u8>, VendorError> {
        tracing::debug!(
            model = %self.model,
            voice = voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.parse_model(),
            input: text.to_string(),
            voice: Self::parse_voice(voice),
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = with_deadline(self.timeout, async {
            self.client
                .audio()
                .speech(request)
                .await
                .map_err(map_openai_error)
        })
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            e
        })?;

        Ok(response.bytes.to_vec())
    }
}

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most `max_chars` characters.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut last_end = 0;
    for sentence_end in SENTENCE_END.find_iter(text) {
        pieces.push(&text[last_end..sentence_end.end()]);
        last_end = sentence_end.end();
    }
    if last_end < text.len() {
        pieces.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for piece in pieces {
        let piece_chars = piece.chars().count();

        if current_chars + piece_chars > max_chars {
            flush_batch(&mut batches, &mut current);
            current_chars = 0;
        }

        // A single sentence longer than the limit is cut by characters
        if piece_chars > max_chars {
            let chars: Vec<char> = piece.chars().collect();
            for chunk in chars.chunks(max_chars) {
                let mut chunk: String = chunk.iter().collect();
                flush_batch(&mut batches, &mut chunk);
            }
            continue;
        }

        current.push_str(piece);
        current_chars += piece_chars;
    }
    flush_batch(&mut batches, &mut current);

    batches
}

fn flush_batch(batches: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
    current.clear();
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, VendorError> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        let mut merged_audio = Vec::new();

        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_openai(batch, voice).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

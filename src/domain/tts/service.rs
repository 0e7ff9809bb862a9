use super::error::TtsServiceError;
use crate::infrastructure::cache::{AudioCache, CachedAudio};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use axum::body::Bytes;
use std::sync::Arc;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// Cache key, also the public media id
    pub id: String,
    pub audio: Bytes,
    pub content_type: String,
    pub voice: String,
    pub cache_hit: bool,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    cache: Arc<AudioCache>,
    default_voice: String,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        cache: Arc<AudioCache>,
        default_voice: String,
    ) -> Self {
        Self {
            tts_repo,
            cache,
            default_voice,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text to speech
    ///
    /// This operation:
    /// - Resolves the voice (request or configured default)
    /// - Serves repeated text/voice pairs from the in-memory cache while fresh
    /// - Calls the speech vendor on a miss and caches the result
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SynthesizedAudio, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SynthesizedAudio, TtsServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsServiceError::Invalid("text is required".to_string()));
        }

        let voice = voice
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.default_voice.to_lowercase());
        let key = AudioCache::compute_key(&voice, text);

        if let Some(cached) = self.cache.get(&key) {
            tracing::info!(
                key = %key,
                voice = %voice,
                cached_audio_size = cached.audio.len(),
                "TTS cache hit - returning cached audio"
            );
            return Ok(SynthesizedAudio {
                id: key,
                audio: cached.audio,
                content_type: cached.content_type,
                voice: cached.voice,
                cache_hit: true,
            });
        }

        let audio = Bytes::from(self.tts_repo.synthesize(text, &voice).await?);

        self.cache.insert(
            key.clone(),
            CachedAudio {
                audio: audio.clone(),
                content_type: AUDIO_CONTENT_TYPE.to_string(),
                voice: voice.clone(),
            },
        );
        tracing::info!(
            key = %key,
            voice = %voice,
            audio_size = audio.len(),
            cache_entries = self.cache.len(),
            "TTS result cached"
        );

        Ok(SynthesizedAudio {
            id: key,
            audio,
            content_type: AUDIO_CONTENT_TYPE.to_string(),
            voice,
            cache_hit: false,
        })
    }
}

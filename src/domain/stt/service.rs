use super::error::SttServiceError;
use crate::infrastructure::repositories::SttRepository;
use async_trait::async_trait;
use std::sync::Arc;

const DEFAULT_FILENAME: &str = "speech.webm";

/// Uploaded recording handed to the transcription vendor
#[derive(Debug, Clone, Default)]
pub struct AudioUpload {
    pub data: Vec<u8>,
    pub filename: Option<String>,
    pub language: Option<String>,
}

pub struct SttService {
    stt_repo: Arc<dyn SttRepository>,
}

impl SttService {
    pub fn new(stt_repo: Arc<dyn SttRepository>) -> Self {
        Self { stt_repo }
    }
}

#[async_trait]
pub trait SttServiceApi: Send + Sync {
    /// Transcribe a learner's recording to text
    async fn transcribe(&self, upload: AudioUpload) -> Result<String, SttServiceError>;
}

#[async_trait]
impl SttServiceApi for SttService {
    async fn transcribe(&self, upload: AudioUpload) -> Result<String, SttServiceError> {
        if upload.data.is_empty() {
            return Err(SttServiceError::Invalid("audio file is empty".to_string()));
        }

        // The vendor infers the container format from the file extension
        let filename = upload
            .filename
            .filter(|name| name.contains('.'))
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        let language = upload
            .language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty());

        tracing::info!(
            filename = %filename,
            language = ?language,
            audio_size_bytes = upload.data.len(),
            "STT request"
        );

        let text = self
            .stt_repo
            .transcribe(upload.data, &filename, language.as_deref())
            .await?;

        Ok(text.trim().to_string())
    }
}

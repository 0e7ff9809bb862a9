use crate::domain::shared::VendorError;
use async_trait::async_trait;

/// Repository for speech-to-text transcription
#[async_trait]
pub trait SttRepository: Send + Sync {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
        language: Option<&str>,
    ) -> Result<String, VendorError>;
}

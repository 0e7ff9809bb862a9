use crate::domain::shared::VendorError;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech vendor.
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
/// - Mapping the requested voice onto a provider voice
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech with the given voice
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, VendorError>;
}

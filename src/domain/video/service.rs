use super::error::VideoServiceError;
use super::model::{TalkRequest, VideoResult};
use crate::infrastructure::repositories::VideoRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fixed-interval polling budget for talk jobs
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SpeakInput {
    pub text: String,
    pub image_url: Option<String>,
    pub voice: Option<String>,
}

pub struct VideoService {
    video_repo: Option<Arc<dyn VideoRepository>>,
    default_image_url: Option<String>,
    default_voice_id: String,
    poll: PollPolicy,
}

impl VideoService {
    pub fn new(
        video_repo: Option<Arc<dyn VideoRepository>>,
        default_image_url: Option<String>,
        default_voice_id: String,
        poll: PollPolicy,
    ) -> Self {
        Self {
            video_repo,
            default_image_url,
            default_voice_id,
            poll,
        }
    }
}

#[async_trait]
pub trait VideoServiceApi: Send + Sync {
    /// Create a talking-avatar video and wait for the vendor to finish it
    ///
    /// This operation:
    /// - Resolves the avatar image (request or configured default)
    /// - Submits the talk job
    /// - Polls at a fixed interval until done, failed, or the attempt budget runs out
    async fn generate(&self, input: SpeakInput) -> Result<VideoResult, VideoServiceError>;
}

#[async_trait]
impl VideoServiceApi for VideoService {
    async fn generate(&self, input: SpeakInput) -> Result<VideoResult, VideoServiceError> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(VideoServiceError::Invalid("text is required".to_string()));
        }

        let source_url = non_blank(input.image_url)
            .or_else(|| self.default_image_url.clone())
            .ok_or_else(|| VideoServiceError::Invalid("imageUrl is required".to_string()))?;

        let video_repo = self
            .video_repo
            .as_ref()
            .ok_or(VideoServiceError::NotConfigured)?;

        let request = TalkRequest {
            source_url,
            text: text.to_string(),
            voice_id: non_blank(input.voice).unwrap_or_else(|| self.default_voice_id.clone()),
        };

        let talk_id = video_repo
            .create_talk(&request)
            .await
            .map_err(VideoServiceError::Create)?;

        self.wait_for_video(&**video_repo, talk_id).await
    }
}

impl VideoService {
    async fn wait_for_video(
        &self,
        video_repo: &dyn VideoRepository,
        talk_id: String,
    ) -> Result<VideoResult, VideoServiceError> {
        let started = Instant::now();

        for attempt in 1..=self.poll.max_attempts {
            tokio::time::sleep(self.poll.interval).await;

            let snapshot = video_repo
                .get_talk(&talk_id)
                .await
                .map_err(|source| VideoServiceError::Poll {
                    talk_id: talk_id.clone(),
                    source,
                })?;

            if let Some(video_url) = snapshot.video_url() {
                tracing::info!(
                    talk_id = %talk_id,
                    attempts = attempt,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Talk video ready"
                );
                return Ok(VideoResult {
                    video_url: video_url.to_string(),
                    talk_id,
                    attempts: attempt,
                });
            }

            if snapshot.status.is_failure() {
                let reason = snapshot
                    .error_description()
                    .unwrap_or_else(|| format!("vendor reported {:?}", snapshot.status));
                return Err(VideoServiceError::Failed { talk_id, reason });
            }

            tracing::debug!(
                talk_id = %talk_id,
                attempt,
                status = ?snapshot.status,
                "Talk still pending"
            );
        }

        tracing::warn!(
            talk_id = %talk_id,
            attempts = self.poll.max_attempts,
            "Talk polling budget exhausted"
        );
        Err(VideoServiceError::TimedOut {
            talk_id,
            attempts: self.poll.max_attempts,
            waited: started.elapsed(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

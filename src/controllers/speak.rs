use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::video::{SpeakInput, VideoService, VideoServiceApi},
    error::{AppError, AppResult},
    infrastructure::http::Payload,
};

/// Request for POST /speak
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequest {
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakResponse {
    pub video_url: String,
    pub talk_id: String,
}

pub struct SpeakController {
    video_service: Arc<VideoService>,
    max_text_chars: usize,
}

impl SpeakController {
    pub fn new(video_service: Arc<VideoService>, max_text_chars: usize) -> Self {
        Self {
            video_service,
            max_text_chars,
        }
    }

    /// POST /speak - Render the text as a talking-avatar video
    pub async fn speak(
        State(controller): State<Arc<SpeakController>>,
        Payload(request): Payload<SpeakRequest>,
    ) -> AppResult<Json<SpeakResponse>> {
        let text = request.text.unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("text is required".to_string()));
        }
        if text.chars().count() > controller.max_text_chars {
            return Err(AppError::PayloadTooLarge(format!(
                "text must be {} characters or less",
                controller.max_text_chars
            )));
        }

        let result = controller
            .video_service
            .generate(SpeakInput {
                text,
                image_url: request.image_url,
                voice: request.voice,
            })
            .await?;

        Ok(Json(SpeakResponse {
            video_url: result.video_url,
            talk_id: result.talk_id,
        }))
    }
}

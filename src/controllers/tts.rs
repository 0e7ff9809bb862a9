use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::tts::{SynthesizedAudio, TtsService, TtsServiceApi},
    error::{AppError, AppResult},
    infrastructure::http::Payload,
};

pub const X_CACHE: &str = "x-cache";
pub const X_AUDIO_ID: &str = "x-audio-id";

/// How the synthesized audio is handed back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// Raw audio bytes in the response body
    #[default]
    Audio,
    /// JSON pointing at `/media/tts/:id`
    Url,
}

/// Request for POST /tts
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub delivery: Option<Delivery>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsUrlResponse {
    pub audio_url: String,
    pub id: String,
    pub cached: bool,
    pub bytes: usize,
}

pub struct TtsController {
    tts_service: Arc<TtsService>,
    max_text_chars: usize,
    public_base_url: Option<String>,
}

impl TtsController {
    pub fn new(
        tts_service: Arc<TtsService>,
        max_text_chars: usize,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            tts_service,
            max_text_chars,
            public_base_url,
        }
    }

    /// POST /tts - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Payload(request): Payload<TtsRequest>,
    ) -> AppResult<Response> {
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
            .tts_service
            .synthesize(&text, request.voice.as_deref())
            .await?;

        match request.delivery.unwrap_or_default() {
            Delivery::Audio => Ok(audio_response(result)),
            Delivery::Url => Ok(Json(TtsUrlResponse {
                audio_url: controller.media_url(&result.id),
                id: result.id,
                cached: result.cache_hit,
                bytes: result.audio.len(),
            })
            .into_response()),
        }
    }

    fn media_url(&self, id: &str) -> String {
        format!(
            "{}/media/tts/{}",
            self.public_base_url.as_deref().unwrap_or_default(),
            id
        )
    }
}

fn audio_response(result: SynthesizedAudio) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&result.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("audio/mpeg")),
    );
    headers.insert(
        X_CACHE,
        HeaderValue::from_static(if result.cache_hit { "HIT" } else { "MISS" }),
    );
    if let Ok(id) = HeaderValue::from_str(&result.id) {
        headers.insert(X_AUDIO_ID, id);
    }

    (StatusCode::OK, headers, Body::from(result.audio)).into_response()
}

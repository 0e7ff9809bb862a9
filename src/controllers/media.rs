use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    infrastructure::{
        cache::AudioCache,
        http::range::{parse_range, ByteRange},
    },
};

/// Serves cached TTS audio by id, with byte-range support for media players
pub struct MediaController {
    cache: Arc<AudioCache>,
}

impl MediaController {
    pub fn new(cache: Arc<AudioCache>) -> Self {
        Self { cache }
    }

    /// GET /media/tts/:id
    pub async fn get_audio(
        State(controller): State<Arc<MediaController>>,
        Path(id): Path<String>,
        headers: HeaderMap,
    ) -> AppResult<Response> {
        controller.serve(&id, &headers, true)
    }

    /// HEAD /media/tts/:id
    pub async fn head_audio(
        State(controller): State<Arc<MediaController>>,
        Path(id): Path<String>,
        headers: HeaderMap,
    ) -> AppResult<Response> {
        controller.serve(&id, &headers, false)
    }

    fn serve(&self, id: &str, request_headers: &HeaderMap, with_body: bool) -> AppResult<Response> {
        let cached = self
            .cache
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("audio {} not found or expired", id)))?;

        let len = cached.audio.len() as u64;
        let range_header = request_headers
            .get(header::RANGE)
            .and_then(|value| value.to_str().ok());
        let range = parse_range(range_header, len);

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&cached.content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
        );
        if let Some(content_range) = range.content_range(len) {
            if let Ok(value) = HeaderValue::from_str(&content_range) {
                headers.insert(header::CONTENT_RANGE, value);
            }
        }

        let (status, body) = match range {
            ByteRange::Full => (StatusCode::OK, cached.audio),
            ByteRange::Partial { start, end } => (
                StatusCode::PARTIAL_CONTENT,
                cached.audio.slice(start as usize..=end as usize),
            ),
            ByteRange::Unsatisfiable => {
                tracing::debug!(id = %id, range = ?range_header, len, "Unsatisfiable range");
                return Ok((StatusCode::RANGE_NOT_SATISFIABLE, headers).into_response());
            }
        };

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        let body = if with_body { Body::from(body) } else { Body::empty() };

        Ok((status, headers, body).into_response())
    }
}

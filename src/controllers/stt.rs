use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::stt::{AudioUpload, SttService, SttServiceApi},
    error::{AppError, AppResult},
    infrastructure::http::payload::rejection,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct SttResponse {
    pub text: String,
}

pub struct SttController {
    stt_service: Arc<SttService>,
}

impl SttController {
    pub fn new(stt_service: Arc<SttService>) -> Self {
        Self { stt_service }
    }

    /// POST /stt - Transcribe an uploaded recording (`file` or `audio` field)
    pub async fn transcribe(
        State(controller): State<Arc<SttController>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<Json<SttResponse>> {
        let mut multipart = multipart.map_err(|e| rejection(e.status(), e.body_text()))?;

        let mut upload: Option<AudioUpload> = None;
        let mut language: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?
        {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "file" | "audio" if upload.is_none() => {
                    let filename = field.file_name().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| rejection(e.status(), e.body_text()))?;
                    upload = Some(AudioUpload {
                        data: data.to_vec(),
                        filename,
                        language: None,
                    });
                }
                "language" => {
                    language = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| rejection(e.status(), e.body_text()))?,
                    );
                }
                _ => {}
            }
        }

        let mut upload = upload.ok_or_else(|| {
            AppError::BadRequest("audio file is required (field `file` or `audio`)".to_string())
        })?;
        upload.language = language;

        let text = controller.stt_service.transcribe(upload).await?;

        Ok(Json(SttResponse { text }))
    }
}

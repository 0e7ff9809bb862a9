use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::chat::{ChatService, ChatServiceApi, Evaluation},
    error::{AppError, AppResult},
    infrastructure::http::Payload,
};

/// Request for POST /ask. Older front-ends send `prompt` instead of `question`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
    pub prompt: Option<String>,
}

impl AskRequest {
    fn question(&self) -> Option<&str> {
        [&self.question, &self.prompt]
            .into_iter()
            .flatten()
            .map(|q| q.trim())
            .find(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Request for POST /evaluate
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub language: Option<String>,
}

pub struct ChatController {
    chat_service: Arc<ChatService>,
}

impl ChatController {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    /// POST /ask - Answer a learner's question
    pub async fn ask(
        State(controller): State<Arc<ChatController>>,
        Payload(request): Payload<AskRequest>,
    ) -> AppResult<Json<AskResponse>> {
        let question = request
            .question()
            .ok_or_else(|| AppError::BadRequest("question is required".to_string()))?;

        let answer = controller.chat_service.ask(question).await?;

        Ok(Json(AskResponse { answer }))
    }

    /// POST /evaluate - Grade a transcribed spoken answer
    pub async fn evaluate(
        State(controller): State<Arc<ChatController>>,
        Payload(request): Payload<EvaluateRequest>,
    ) -> AppResult<Json<Evaluation>> {
        let question = request.question.as_deref().unwrap_or_default();
        let answer = request.answer.as_deref().unwrap_or_default();
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(AppError::BadRequest(
                "question and answer are required".to_string(),
            ));
        }

        let evaluation = controller
            .chat_service
            .evaluate(question, answer, request.language.as_deref())
            .await?;

        Ok(Json(evaluation))
    }
}

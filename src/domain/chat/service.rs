use super::error::ChatServiceError;
use super::model::{ChatMessage, Evaluation};
use crate::infrastructure::repositories::ChatRepository;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

const EVALUATION_SYSTEM_PROMPT: &str = "You grade a language learner's spoken answer. \
Reply with JSON only, shaped as {\"score\": integer 0-10, \"feedback\": short encouraging feedback, \
\"correction\": corrected answer or null}.";

pub struct ChatService {
    chat_repo: Arc<dyn ChatRepository>,
    system_prompt: String,
}

impl ChatService {
    pub fn new(chat_repo: Arc<dyn ChatRepository>, system_prompt: String) -> Self {
        Self {
            chat_repo,
            system_prompt,
        }
    }
}

#[async_trait]
pub trait ChatServiceApi: Send + Sync {
    /// Answer a learner's free-form question
    async fn ask(&self, question: &str) -> Result<String, ChatServiceError>;

    /// Grade a transcribed spoken answer to `question`
    async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        language: Option<&str>,
    ) -> Result<Evaluation, ChatServiceError>;
}

#[async_trait]
impl ChatServiceApi for ChatService {
    async fn ask(&self, question: &str) -> Result<String, ChatServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatServiceError::Invalid("question is required".to_string()));
        }

        tracing::info!(question_length = question.len(), "Ask request");

        let messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(question),
        ];
        let answer = self.complete(&messages).await?;

        tracing::info!(answer_length = answer.len(), "Ask answered");
        Ok(answer)
    }

    async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        language: Option<&str>,
    ) -> Result<Evaluation, ChatServiceError> {
        let (question, answer) = (question.trim(), answer.trim());
        if question.is_empty() || answer.is_empty() {
            return Err(ChatServiceError::Invalid(
                "question and answer are required".to_string(),
            ));
        }

        let mut prompt = String::new();
        if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
            prompt.push_str(&format!("Target language: {}\n", language));
        }
        prompt.push_str(&format!(
            "Question: {}\nLearner answer (transcribed speech): {}",
            question, answer
        ));

        let messages = vec![
            ChatMessage::system(EVALUATION_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];
        let reply = self.complete(&messages).await?;
        let evaluation = parse_evaluation(&reply);

        tracing::info!(
            score = ?evaluation.score,
            has_correction = evaluation.correction.is_some(),
            "Answer evaluated"
        );
        Ok(evaluation)
    }
}

impl ChatService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatServiceError> {
        let reply = self.chat_repo.complete(messages).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ChatServiceError::EmptyAnswer);
        }
        Ok(reply.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    score: Option<f64>,
    feedback: Option<String>,
    correction: Option<String>,
}

/// Parse the grader's reply. Models often wrap the JSON in prose or code fences,
/// so the outermost `{...}` is tried first; anything unparsable becomes plain feedback.
/// Parsed JSON without `feedback` takes the prose around the object instead.
pub fn parse_evaluation(reply: &str) -> Evaluation {
    let trimmed = reply.trim();
    let span = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => Some((start, end)),
        _ => None,
    };
    let candidate = span.map_or(trimmed, |(start, end)| &trimmed[start..=end]);

    match serde_json::from_str::<RawEvaluation>(candidate) {
        Ok(raw) => Evaluation {
            score: raw.score.map(|s| s.round().clamp(0.0, 10.0) as u8),
            feedback: raw
                .feedback
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| {
                    span.map(|(start, end)| prose_around(trimmed, start, end))
                        .unwrap_or_default()
                }),
            correction: raw.correction.filter(|c| !c.trim().is_empty()),
        },
        Err(_) => Evaluation {
            score: None,
            feedback: trimmed.to_string(),
            correction: None,
        },
    }
}

/// Text before and after the JSON object, without code fences
fn prose_around(reply: &str, start: usize, end: usize) -> String {
    let outside = format!("{} {}", &reply[..start], &reply[end + 1..]);
    outside
        .split_whitespace()
        .filter(|word| !word.starts_with("```"))
        .collect::<Vec<_>>()
        .join(" ")
}

use crate::domain::shared::VendorError;
use crate::error::AppError;
use axum::http::StatusCode;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum VideoServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("video vendor is not configured")]
    NotConfigured,
    #[error("talk creation failed: {0}")]
    Create(VendorError),
    #[error("polling talk {talk_id} failed: {source}")]
    Poll {
        talk_id: String,
        source: VendorError,
    },
    #[error("talk {talk_id} failed: {reason}")]
    Failed { talk_id: String, reason: String },
    #[error("talk {talk_id} not ready after {attempts} polls ({waited:?})")]
    TimedOut {
        talk_id: String,
        attempts: u32,
        waited: Duration,
    },
}

impl From<VideoServiceError> for AppError {
    fn from(err: VideoServiceError) -> Self {
        match err {
            VideoServiceError::Invalid(msg) => AppError::BadRequest(msg),
            e @ VideoServiceError::NotConfigured => AppError::ServiceUnavailable(e.to_string()),
            VideoServiceError::Create(source) if source.is_client_error() => match source {
                VendorError::Status { status, message } => AppError::Upstream {
                    status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message,
                },
                other => AppError::BadGateway(other.to_string()),
            },
            e @ VideoServiceError::Create(VendorError::Timeout(_))
            | e @ VideoServiceError::Poll {
                source: VendorError::Timeout(_),
                ..
            }
            | e @ VideoServiceError::TimedOut { .. } => AppError::GatewayTimeout(e.to_string()),
            e => AppError::BadGateway(e.to_string()),
        }
    }
}

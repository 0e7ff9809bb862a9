use crate::domain::shared::VendorError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(#[from] VendorError),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::Dependency(VendorError::Timeout(limit)) => {
                AppError::GatewayTimeout(format!("speech synthesis exceeded {:?}", limit))
            }
            TtsServiceError::Dependency(e) => AppError::BadGateway(e.to_string()),
        }
    }
}

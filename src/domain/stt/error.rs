use crate::domain::shared::VendorError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SttServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(#[from] VendorError),
}

impl From<SttServiceError> for AppError {
    fn from(err: SttServiceError) -> Self {
        match err {
            SttServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SttServiceError::Dependency(VendorError::Timeout(limit)) => {
                AppError::GatewayTimeout(format!("transcription exceeded {:?}", limit))
            }
            SttServiceError::Dependency(e) => AppError::BadGateway(e.to_string()),
        }
    }
}

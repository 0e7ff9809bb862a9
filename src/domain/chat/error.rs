use crate::domain::shared::VendorError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(#[from] VendorError),
    #[error("vendor returned an empty answer")]
    EmptyAnswer,
}

impl From<ChatServiceError> for AppError {
    fn from(err: ChatServiceError) -> Self {
        match err {
            ChatServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ChatServiceError::Dependency(VendorError::InvalidResponse(msg)) => {
                AppError::BadGateway(msg)
            }
            ChatServiceError::Dependency(VendorError::Timeout(limit)) => {
                AppError::GatewayTimeout(format!("chat completion exceeded {:?}", limit))
            }
            ChatServiceError::Dependency(e) => AppError::Vendor(e.to_string()),
            e @ ChatServiceError::EmptyAnswer => AppError::Vendor(e.to_string()),
        }
    }
}

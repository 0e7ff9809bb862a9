use std::time::Duration;

/// Failure talking to a third-party vendor API
#[derive(Debug, Clone, thiserror::Error)]
pub enum VendorError {
    /// Vendor answered with a non-success HTTP status
    #[error("vendor returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Vendor SDK reported an API error without exposing the status
    #[error("vendor rejected request: {0}")]
    Api(String),

    /// Vendor answered 2xx but the body was not the JSON we expected
    #[error("unexpected vendor response: {0}")]
    InvalidResponse(String),

    #[error("vendor unreachable: {0}")]
    Transport(String),

    #[error("vendor call exceeded {0:?}")]
    Timeout(Duration),
}

impl VendorError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }
}

/// Run a vendor call under a deadline
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, VendorError>
where
    F: std::future::Future<Output = Result<T, VendorError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| VendorError::Timeout(deadline))?
}

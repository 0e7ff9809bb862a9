use crate::domain::shared::VendorError;
use crate::domain::video::{TalkRequest, TalkSnapshot};
use async_trait::async_trait;

/// Repository for the asynchronous talking-avatar job API
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Submit a talk job and return the vendor-assigned id
    async fn create_talk(&self, request: &TalkRequest) -> Result<String, VendorError>;

    /// Fetch the current state of a talk job
    async fn get_talk(&self, talk_id: &str) -> Result<TalkSnapshot, VendorError>;
}

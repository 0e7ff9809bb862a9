pub mod error;
pub mod service;

pub use error::SttServiceError;
pub use service::{AudioUpload, SttService, SttServiceApi};

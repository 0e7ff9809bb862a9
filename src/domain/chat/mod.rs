pub mod error;
pub mod model;
pub mod service;

pub use error::ChatServiceError;
pub use model::{ChatMessage, ChatRole, Evaluation};
pub use service::{ChatService, ChatServiceApi};

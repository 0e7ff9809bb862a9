pub mod error;
pub mod model;
pub mod service;

pub use error::VideoServiceError;
pub use model::{TalkRequest, TalkSnapshot, TalkStatus, VideoResult};
pub use service::{PollPolicy, SpeakInput, VideoService, VideoServiceApi};

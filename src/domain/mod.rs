pub mod chat;
pub mod shared;
pub mod stt;
pub mod tts;
pub mod video;

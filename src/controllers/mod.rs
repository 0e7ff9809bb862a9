pub mod chat;
pub mod health;
pub mod media;
pub mod speak;
pub mod stt;
pub mod tts;

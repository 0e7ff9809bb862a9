pub mod chat_repository;
pub mod did_video_repository;
pub mod openai_chat_repository;
pub mod openai_client;
pub mod openai_stt_repository;
pub mod openai_tts_repository;
pub mod stt_repository;
pub mod tts_repository;
pub mod video_repository;

pub use chat_repository::ChatRepository;
pub use did_video_repository::DidVideoRepository;
pub use openai_chat_repository::OpenAiChatRepository;
pub use openai_client::build_openai_client;
pub use openai_stt_repository::OpenAiSttRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use stt_repository::SttRepository;
pub use tts_repository::TtsRepository;
pub use video_repository::VideoRepository;

use axum::Router;
use std::sync::Arc;

use crate::controllers::{
    chat::ChatController, health::HealthInfo, media::MediaController, speak::SpeakController,
    stt::SttController, tts::TtsController,
};
use crate::domain::{
    chat::ChatService,
    stt::SttService,
    tts::TtsService,
    video::{PollPolicy, VideoService},
};
use crate::infrastructure::{
    cache::AudioCache,
    config::Config,
    http::{build_router, Controllers, ROUTES},
    repositories::{
        build_openai_client, DidVideoRepository, OpenAiChatRepository, OpenAiSttRepository,
        OpenAiTtsRepository, VideoRepository,
    },
};

/// Wire repositories, services and controllers into the application router
pub fn create_app(config: Arc<Config>) -> Router {
    let timeout = config.vendor_timeout();

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Vendor clients and repositories
    tracing::info!(api_base = %config.openai_api_base, "Instantiating repositories...");
    let openai = Arc::new(build_openai_client(
        &config.openai_api_key,
        &config.openai_api_base,
    ));
    let chat_repo = Arc::new(OpenAiChatRepository::new(
        openai.clone(),
        config.chat_model.clone(),
        timeout,
    ));
    let tts_repo = Arc::new(OpenAiTtsRepository::new(
        openai.clone(),
        config.tts_model.clone(),
        timeout,
    ));
    let stt_repo = Arc::new(OpenAiSttRepository::new(
        openai,
        config.stt_model.clone(),
        timeout,
    ));
    let video_repo: Option<Arc<dyn VideoRepository>> = match &config.did_api_key {
        Some(api_key) => Some(Arc::new(DidVideoRepository::new(
            api_key.clone(),
            config.did_api_base.clone(),
            timeout,
        ))),
        None => {
            tracing::warn!("DID_API_KEY is not set; /speak will answer 503");
            None
        }
    };

    // 2. Shared audio cache
    let cache = Arc::new(AudioCache::new(
        config.tts_cache_max_entries,
        config.tts_cache_ttl(),
    ));
    tracing::info!(
        capacity = cache.capacity(),
        ttl_secs = config.tts_cache_ttl_secs,
        "TTS audio cache ready"
    );

    // 3. Services
    tracing::info!("Instantiating services...");
    let chat_service = Arc::new(ChatService::new(
        chat_repo,
        config.ask_system_prompt.clone(),
    ));
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        cache.clone(),
        config.tts_voice.clone(),
    ));
    let stt_service = Arc::new(SttService::new(stt_repo));
    let video_service = Arc::new(VideoService::new(
        video_repo,
        config.default_avatar_url.clone(),
        config.did_voice_id.clone(),
        PollPolicy {
            max_attempts: config.speak_poll_attempts,
            interval: config.speak_poll_interval(),
        },
    ));

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let controllers = Controllers {
        chat: Arc::new(ChatController::new(chat_service)),
        speak: Arc::new(SpeakController::new(video_service, config.max_text_chars)),
        tts: Arc::new(TtsController::new(
            tts_service,
            config.max_text_chars,
            config.public_base_url.clone(),
        )),
        stt: Arc::new(SttController::new(stt_service)),
        media: Arc::new(MediaController::new(cache)),
        health: Arc::new(HealthInfo {
            origins: config.allowed_origins.clone(),
            routes: ROUTES.to_vec(),
        }),
    };

    build_router(&config, controllers)
}

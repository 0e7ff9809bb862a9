use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{
            ACCEPT_RANGES, AUTHORIZATION, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE,
        },
        HeaderName, HeaderValue, Method,
    },
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    chat::ChatController,
    health::{self, HealthInfo},
    media::MediaController,
    speak::SpeakController,
    stt::SttController,
    tts::{TtsController, X_AUDIO_ID, X_CACHE},
};
use crate::infrastructure::config::Config;

pub mod payload;
pub mod range;
pub mod request_id;

pub use payload::Payload;
pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Public routes, reported by the health endpoint. Each is also served under `/api`.
pub const ROUTES: &[&str] = &[
    "GET /health",
    "POST /ask",
    "POST /evaluate",
    "POST /speak",
    "POST /tts",
    "GET|HEAD /media/tts/:id",
    "POST /stt",
    "POST /transcribe",
];

/// Controllers wired into the router
pub struct Controllers {
    pub chat: Arc<ChatController>,
    pub speak: Arc<SpeakController>,
    pub tts: Arc<TtsController>,
    pub stt: Arc<SttController>,
    pub media: Arc<MediaController>,
    pub health: Arc<HealthInfo>,
}

/// Register `path` and its `/api` twin
fn aliased<S>(router: Router<S>, path: &str, method_router: MethodRouter<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route(path, method_router.clone())
        .route(&format!("/api{}", path), method_router)
}

/// Build the application router with every route and layer configured
pub fn build_router(config: &Config, controllers: Controllers) -> Router {
    let health_routes = aliased(Router::new(), "/health", get(health::health))
        .with_state(controllers.health);

    let chat_routes = aliased(Router::new(), "/ask", post(ChatController::ask));
    let chat_routes = aliased(chat_routes, "/evaluate", post(ChatController::evaluate))
        .with_state(controllers.chat);

    let speak_routes =
        aliased(Router::new(), "/speak", post(SpeakController::speak)).with_state(controllers.speak);

    let tts_routes =
        aliased(Router::new(), "/tts", post(TtsController::synthesize)).with_state(controllers.tts);

    let media_routes = aliased(
        Router::new(),
        "/media/tts/:id",
        get(MediaController::get_audio).head(MediaController::head_audio),
    )
    .with_state(controllers.media);

    let stt_routes = aliased(Router::new(), "/stt", post(SttController::transcribe));
    let stt_routes = aliased(stt_routes, "/transcribe", post(SttController::transcribe))
        .with_state(controllers.stt);

    Router::new()
        .merge(health_routes)
        .merge(chat_routes)
        .merge(speak_routes)
        .merge(tts_routes)
        .merge(media_routes)
        .merge(stt_routes)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors_layer(config))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// CORS restricted to the configured allow-list; disallowed origins get no CORS headers
pub fn cors_layer(config: &Config) -> CorsLayer {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            RANGE,
            HeaderName::from_static(X_REQUEST_ID),
        ])
        .expose_headers([
            CONTENT_RANGE,
            ACCEPT_RANGES,
            CONTENT_LENGTH,
            HeaderName::from_static(X_CACHE),
            HeaderName::from_static(X_AUDIO_ID),
            HeaderName::from_static(X_REQUEST_ID),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!(
        origins = ?config.allowed_origins,
        "Server listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_ASK_SYSTEM_PROMPT: &str = "You are a friendly language tutor. Answer the learner's \
question clearly and briefly, with a short example when it helps.";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // HTTP front door
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
    pub max_text_chars: usize,
    pub public_base_url: Option<String>,
    // Chat / speech vendor
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub chat_model: String,
    pub ask_system_prompt: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub stt_model: String,
    // TTS cache
    pub tts_cache_ttl_secs: u64,
    pub tts_cache_max_entries: usize,
    // Video vendor
    pub did_api_key: Option<String>,
    pub did_api_base: String,
    pub did_voice_id: String,
    pub default_avatar_url: Option<String>,
    pub speak_poll_attempts: u32,
    pub speak_poll_interval_ms: u64,
    pub vendor_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            body_limit_bytes: env::var("BODY_LIMIT_BYTES")
                .unwrap_or_else(|_| (25 * 1024 * 1024).to_string())
                .parse()?,
            max_text_chars: env::var("MAX_TEXT_CHARS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()?,
            public_base_url: optional_var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            ask_system_prompt: env::var("ASK_SYSTEM_PROMPT")
                .unwrap_or_else(|_| DEFAULT_ASK_SYSTEM_PROMPT.to_string()),
            tts_model: env::var("TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            stt_model: env::var("STT_MODEL").unwrap_or_else(|_| "whisper-1".to_string()),
            tts_cache_ttl_secs: env::var("TTS_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            tts_cache_max_entries: env::var("TTS_CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| "200".to_string())
                .parse()?,
            did_api_key: optional_var("DID_API_KEY"),
            did_api_base: env::var("DID_API_BASE")
                .unwrap_or_else(|_| "https://api.d-id.com".to_string()),
            did_voice_id: env::var("DID_VOICE_ID")
                .unwrap_or_else(|_| "en-US-JennyNeural".to_string()),
            default_avatar_url: optional_var("DEFAULT_AVATAR_URL"),
            speak_poll_attempts: env::var("SPEAK_POLL_ATTEMPTS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
            speak_poll_interval_ms: env::var("SPEAK_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1250".to_string())
                .parse()?,
            vendor_timeout_secs: env::var("VENDOR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
        };

        Ok(config)
    }

    /// Empty allow-list means any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    pub fn tts_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.tts_cache_ttl_secs)
    }

    pub fn speak_poll_interval(&self) -> Duration {
        Duration::from_millis(self.speak_poll_interval_ms)
    }

    pub fn vendor_timeout(&self) -> Duration {
        Duration::from_secs(self.vendor_timeout_secs)
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated origin list. A lone `*` yields an empty (allow-any) list.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

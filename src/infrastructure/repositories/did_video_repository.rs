use super::video_repository::VideoRepository;
use crate::domain::shared::{with_deadline, VendorError};
use crate::domain::video::{TalkRequest, TalkSnapshot};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
struct CreateTalkBody<'a> {
    source_url: &'a str,
    script: TalkScript<'a>,
    config: TalkConfig,
}

#[derive(Debug, Serialize)]
struct TalkScript<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    input: &'a str,
    provider: VoiceProvider<'a>,
}

#[derive(Debug, Serialize)]
struct VoiceProvider<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    voice_id: &'a str,
}

#[derive(Debug, Serialize)]
struct TalkConfig {
    stitch: bool,
}

#[derive(Debug, Deserialize)]
struct CreateTalkResponse {
    id: String,
}

/// D-ID `/talks` implementation of the video repository
pub struct DidVideoRepository {
    api_key: String,
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl DidVideoRepository {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http_client: reqwest::Client::new(),
        }
    }

    /// Keys shaped `user:secret` go out as HTTP basic credentials,
    /// anything else is sent verbatim after `Basic `.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_key.split_once(':') {
            Some((user, secret)) => request.basic_auth(user, Some(secret)),
            None => request.header(AUTHORIZATION, format!("Basic {}", self.api_key)),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, VendorError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VendorError::Transport(format!("failed to read D-ID response: {}", e)))?;

        if !status.is_success() {
            return Err(VendorError::Status {
                status: status.as_u16(),
                message: vendor_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            VendorError::InvalidResponse(format!("D-ID returned non-JSON body: {}", e))
        })
    }
}

/// Pull the most useful message out of a vendor error body
fn vendor_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["description", "message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl VideoRepository for DidVideoRepository {
    async fn create_talk(&self, request: &TalkRequest) -> Result<String, VendorError> {
        let body = CreateTalkBody {
            source_url: &request.source_url,
            script: TalkScript {
                kind: "text",
                input: &request.text,
                provider: VoiceProvider {
                    kind: "microsoft",
                    voice_id: &request.voice_id,
                },
            },
            config: TalkConfig { stitch: true },
        };

        let created: CreateTalkResponse = with_deadline(self.timeout, async {
            let response = self
                .authorize(self.http_client.post(format!("{}/talks", self.base_url)))
                .json(&body)
                .send()
                .await
                .map_err(|e| VendorError::Transport(format!("D-ID create failed: {}", e)))?;
            Self::read_json(response).await
        })
        .await?;

        tracing::info!(
            talk_id = %created.id,
            text_length = request.text.len(),
            voice_id = %request.voice_id,
            "D-ID talk created"
        );

        Ok(created.id)
    }

    async fn get_talk(&self, talk_id: &str) -> Result<TalkSnapshot, VendorError> {
        with_deadline(self.timeout, async {
            let response = self
                .authorize(
                    self.http_client
                        .get(format!("{}/talks/{}", self.base_url, talk_id)),
                )
                .send()
                .await
                .map_err(|e| VendorError::Transport(format!("D-ID poll failed: {}", e)))?;
            Self::read_json(response).await
        })
        .await
    }
}

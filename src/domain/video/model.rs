use serde::Deserialize;
use serde_json::Value;

/// Lifecycle state reported by the video vendor for a talk job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalkStatus {
    Created,
    Started,
    Done,
    Error,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TalkStatus {
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Rejected)
    }
}

/// What the front-end asks the avatar to say
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkRequest {
    pub source_url: String,
    pub text: String,
    pub voice_id: String,
}

/// One poll result for a talk job
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalkSnapshot {
    #[serde(default)]
    pub status: TalkStatus,
    pub result_url: Option<String>,
    pub error: Option<Value>,
}

impl TalkSnapshot {
    /// Human readable vendor error, if the vendor reported one
    pub fn error_description(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("description")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| Some(Value::Object(map.clone()).to_string())),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// A finished job with a usable video URL
    pub fn video_url(&self) -> Option<&str> {
        if self.status != TalkStatus::Done {
            return None;
        }
        self.result_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResult {
    pub talk_id: String,
    pub video_url: String,
    pub attempts: u32,
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

/// Static facts reported by the health endpoint
#[derive(Debug, Clone)]
pub struct HealthInfo {
    pub origins: Vec<String>,
    pub routes: Vec<&'static str>,
}

pub async fn health(State(info): State<Arc<HealthInfo>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "origins": info.origins,
            "routes": info.routes,
            "time": Utc::now(),
        })),
    )
}

use crate::e2e::helpers;

use helpers::{assert_error_response, TestContext};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_text_to_speech(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hola, ¿qué tal?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("content-type", "audio/mpeg");
    response.assert_header("x-cache", "MISS");
    response.assert_header_exists("x-audio-id");
    assert_eq!(response.body_bytes, "ID3:alloy:Hola, ¿qué tal?".as_bytes());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeated_text_from_cache(ctx: &TestContext) {
    let first = ctx
        .client
        .post("/tts", &json!({ "text": "Good morning everyone" }))
        .await
        .unwrap();
    first.assert_status(StatusCode::OK);
    first.assert_header("x-cache", "MISS");

    // Whitespace differences hit the same entry
    let second = ctx
        .client
        .post("/api/tts", &json!({ "text": "  Good   morning\neveryone " }))
        .await
        .unwrap();
    second.assert_status(StatusCode::OK);
    second.assert_header("x-cache", "HIT");

    assert_eq!(first.body_bytes, second.body_bytes);
    assert_eq!(first.header("x-audio-id"), second.header("x-audio-id"));
    assert_eq!(ctx.vendor.speech_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_cache_per_voice(ctx: &TestContext) {
    let alloy = ctx
        .client
        .post("/tts", &json!({ "text": "Danke schön" }))
        .await
        .unwrap();
    let nova = ctx
        .client
        .post("/tts", &json!({ "text": "Danke schön", "voice": "NOVA" }))
        .await
        .unwrap();

    alloy.assert_status(StatusCode::OK);
    nova.assert_status(StatusCode::OK);
    nova.assert_header("x-cache", "MISS");
    assert_eq!(nova.body_bytes, "ID3:nova:Danke schön".as_bytes());
    assert_ne!(alloy.header("x-audio-id"), nova.header("x-audio-id"));
    assert_eq!(ctx.vendor.speech_calls(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_media_url_when_requested(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Bonjour", "delivery": "url" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    let id = body["id"].as_str().unwrap();
    assert_eq!(
        body["audioUrl"].as_str().unwrap(),
        format!("http://tutor.test/media/tts/{}", id)
    );
    assert_eq!(body["cached"], false);
    assert_eq!(body["bytes"], "ID3:alloy:Bonjour".len());

    let media = ctx
        .client
        .get(&format!("/media/tts/{}", id))
        .await
        .unwrap();
    media.assert_status(StatusCode::OK);
    assert_eq!(media.body_bytes, b"ID3:alloy:Bonjour");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text(ctx: &TestContext) {
    let response = ctx.client.post("/tts", &json!({ "text": "  " })).await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_response(response.body.as_ref().unwrap(), "bad_request");
    assert_eq!(ctx.vendor.speech_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_the_limit(ctx: &TestContext) {
    let text = "a".repeat(ctx.config.max_text_chars + 1);

    let response = ctx.client.post("/tts", &json!({ "text": text })).await.unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_error_response(response.body.as_ref().unwrap(), "payload_too_large");
    assert_eq!(ctx.vendor.speech_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_cache_vendor_failures(ctx: &TestContext) {
    let body = json!({ "text": "vendor-reject this" });

    let first = ctx.client.post("/tts", &body).await.unwrap();
    first.assert_status(StatusCode::BAD_GATEWAY);
    assert_error_response(first.body.as_ref().unwrap(), "bad_gateway");

    let second = ctx.client.post("/tts", &body).await.unwrap();
    second.assert_status(StatusCode::BAD_GATEWAY);

    assert_eq!(ctx.vendor.speech_calls(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_vendor_outage_to_bad_gateway(ctx: &TestContext) {
    ctx.vendor.fail_openai(StatusCode::INTERNAL_SERVER_ERROR);

    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_error_response(response.body.as_ref().unwrap(), "bad_gateway");
    assert_eq!(ctx.vendor.speech_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_retry_rate_limited_speech(ctx: &TestContext) {
    ctx.vendor.fail_openai(StatusCode::TOO_MANY_REQUESTS);

    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(ctx.vendor.speech_calls(), 1);
}

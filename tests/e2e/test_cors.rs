use crate::e2e::helpers;

use helpers::{TestContext, TEST_ORIGIN};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_allow_preflight_from_configured_origin(ctx: &TestContext) {
    let response = ctx
        .client
        .options_with_headers(
            "/tts",
            &[
                ("origin", TEST_ORIGIN),
                ("access-control-request-method", "POST"),
                ("access-control-request-headers", "content-type"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("access-control-allow-origin", TEST_ORIGIN);
    assert!(response
        .header("access-control-allow-methods")
        .unwrap()
        .contains("POST"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_expose_custom_headers_to_allowed_origin(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("origin", TEST_ORIGIN)])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("access-control-allow-origin", TEST_ORIGIN);
    let exposed = response.header("access-control-expose-headers").unwrap();
    assert!(exposed.contains("x-cache"));
    assert!(exposed.contains("content-range"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_grant_cors_to_unknown_origins(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("origin", "https://evil.example.com")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.header("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn it_should_allow_any_origin_when_list_is_empty() {
    let ctx = TestContext::start(|config| config.allowed_origins.clear()).await;

    let response = ctx
        .client
        .get_with_headers("/health", &[("origin", "https://anywhere.example.com")])
        .await
        .unwrap();

    response.assert_header("access-control-allow-origin", "*");
}

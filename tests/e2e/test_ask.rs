use crate::e2e::helpers;

use helpers::{assert_error_response, TestContext};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_a_question(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/ask", &json!({ "question": "How do I say thanks in Spanish?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["answer"],
        "Answer to: How do I say thanks in Spanish?"
    );
    assert_eq!(ctx.vendor.chat_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_prompt_as_question_alias(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/ask", &json!({ "prompt": "  What is 'gato'?  " }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["answer"],
        "Answer to: What is 'gato'?"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_form_encoded_bodies(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw(
            "/ask",
            "application/x-www-form-urlencoded",
            "question=Bonjour%3F",
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["answer"], "Answer to: Bonjour?");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_question(ctx: &TestContext) {
    let response = ctx.client.post("/ask", &json!({ "question": "   " })).await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_response(response.body.as_ref().unwrap(), "bad_request");
    assert_eq!(ctx.vendor.chat_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/ask", "application/json", "{not json")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_response(response.body.as_ref().unwrap(), "bad_request");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_vendor_failure_as_server_error(ctx: &TestContext) {
    ctx.vendor.fail_openai(StatusCode::BAD_REQUEST);

    let response = ctx
        .client
        .post("/ask", &json!({ "question": "Hello?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_response(response.body.as_ref().unwrap(), "vendor_error");
    response.assert_error_message("model overloaded");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_retry_rate_limited_questions(ctx: &TestContext) {
    ctx.vendor.fail_openai(StatusCode::TOO_MANY_REQUESTS);

    let response = ctx
        .client
        .post("/ask", &json!({ "question": "Hello?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_response(response.body.as_ref().unwrap(), "vendor_error");
    response.assert_error_message("Rate limit reached");
    assert_eq!(ctx.vendor.chat_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_vendor_outage_as_server_error(ctx: &TestContext) {
    ctx.vendor.fail_openai(StatusCode::SERVICE_UNAVAILABLE);

    let response = ctx
        .client
        .post(
            "/evaluate",
            &json!({ "question": "What is your name?", "answer": "Ana" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_response(response.body.as_ref().unwrap(), "vendor_error");
    assert_eq!(ctx.vendor.chat_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_evaluate_a_spoken_answer(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/evaluate",
            &json!({
                "question": "What is your name?",
                "answer": "Me llamo es Ana",
                "language": "es"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["score"], 8);
    assert_eq!(body["feedback"], "Good job");
    assert_eq!(body["correction"], "Me llamo Ana");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_evaluation_without_answer(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/evaluate", &json!({ "question": "What is your name?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.vendor.chat_calls(), 0);
}

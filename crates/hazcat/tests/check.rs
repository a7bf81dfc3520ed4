//! End-to-end tests for HazCat against a mocked Responses API.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hazcat::{
    EnvelopeDefect, HazCat, HazCatConfig, ImageDetail, MAX_IMAGE_BYTES, MediaType, Stage, Verdict,
    VerdictError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn test_config(server: &MockServer) -> HazCatConfig {
    HazCatConfig::new("test-key", "test-model").with_base_url(format!("{}/v1", server.uri()))
}

fn create_test_client(server: &MockServer) -> HazCat {
    HazCat::new(test_config(server)).expect("failed to create client")
}

fn image() -> String {
    STANDARD.encode(PNG_BYTES)
}

#[tokio::test]
async fn test_flattened_text_yields_verdict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "test-model" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_1",
            "object": "response",
            "output_text": "{\"hazCat\": true, \"message\": \"That's Garfield!\"}",
            "output": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let verdict = client.check(image(), MediaType::Png).await.expect("check failed");

    assert_eq!(verdict, Verdict::new(true, "That's Garfield!"));
}

#[tokio::test]
async fn test_request_carries_rules_and_data_uri() {
    let server = MockServer::start().await;
    let expected_url = format!("data:image/png;base64,{}", image());

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(body_partial_json(json!({
            "input": [
                { "role": "system", "content": hazcat::CASE_RULES },
                {
                    "role": "user",
                    "content": [{
                        "type": "input_image",
                        "image_url": expected_url,
                        "detail": "high"
                    }]
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output_text": "{\"hazCat\": false, \"message\": \"Just a teapot. No cat :(\"}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HazCat::new(test_config(&server).with_detail(ImageDetail::High)).unwrap();
    let verdict = client.check(image(), MediaType::Png).await.expect("check failed");

    assert!(!verdict.contains_cat);
}

#[tokio::test]
async fn test_structured_output_without_flattened_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_2",
            "output": [
                { "type": "reasoning", "id": "rs_1", "summary": [] },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [{
                        "type": "output_text",
                        "text": "{\"hazCat\": true, \"message\": \"Wow, so many cats!\"}",
                        "annotations": []
                    }]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let verdict = client.check(image(), MediaType::Webp).await.expect("check failed");

    assert_eq!(verdict, Verdict::new(true, "Wow, so many cats!"));
}

#[tokio::test]
async fn test_untyped_items_do_not_break_decoding() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output_text": "{\"hazCat\": true, \"message\": \"A fluffy tabby!\"}",
            "output": [{ "id": "x" }]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let verdict = client.check(image(), MediaType::Png).await.expect("check failed");

    assert_eq!(verdict, Verdict::new(true, "A fluffy tabby!"));
}

#[tokio::test]
async fn test_untyped_first_item_is_missing_message_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [{ "id": "x" }]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    assert!(matches!(
        err,
        VerdictError::MalformedEnvelope(EnvelopeDefect::MissingMessageContent)
    ));
}

#[tokio::test]
async fn test_empty_output_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_3",
            "output": []
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    assert!(matches!(
        err,
        VerdictError::MalformedEnvelope(EnvelopeDefect::EmptyOutput)
    ));
    assert_eq!(err.stage(), Stage::Parsing);
}

#[tokio::test]
async fn test_null_body_is_missing_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("null", "application/json"),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    assert!(matches!(
        err,
        VerdictError::MalformedEnvelope(EnvelopeDefect::MissingResponse)
    ));
}

#[tokio::test]
async fn test_non_json_body_is_undecodable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    assert!(matches!(
        err,
        VerdictError::MalformedEnvelope(EnvelopeDefect::Undecodable(_))
    ));
}

#[tokio::test]
async fn test_model_text_with_wrong_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output_text": "{\"hazCat\": \"true\", \"message\": \"hi\"}"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    assert!(matches!(err, VerdictError::SchemaMismatch(_)));
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    match err {
        VerdictError::Api { status, ref body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        ref other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(err.stage(), Stage::Calling);
}

#[tokio::test]
async fn test_validation_failures_skip_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    let err = client.check_raw(image(), "image/bmp").await.unwrap_err();
    assert!(matches!(err, VerdictError::UnsupportedMediaType { .. }));

    let too_big = "A".repeat(((MAX_IMAGE_BYTES + 3) / 3 * 4) as usize);
    let err = client.check(too_big, MediaType::Jpeg).await.unwrap_err();
    assert!(matches!(err, VerdictError::PayloadTooLarge { .. }));
    assert_eq!(err.stage(), Stage::Validating);
}

#[tokio::test]
async fn test_timeout_is_a_call_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "output_text": "{}" })),
        )
        .mount(&server)
        .await;

    let client =
        HazCat::new(test_config(&server).with_timeout(Duration::from_millis(100))).unwrap();
    let err = client.check(image(), MediaType::Png).await.unwrap_err();

    assert!(matches!(err, VerdictError::Http(_)));
    assert_eq!(err.stage(), Stage::Calling);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = HazCat::new(HazCatConfig::new("", "m")).unwrap_err();
    assert!(matches!(err, VerdictError::Config(_)));
}

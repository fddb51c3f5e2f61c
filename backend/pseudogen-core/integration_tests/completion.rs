use crate::helpers::{
    TEST_API_KEY, closed_local_uri, completion_body, settings_for, settings_for_uri,
    settings_with_timeout,
};

use pseudogen_core::error::CompletionError;
use pseudogen_core::{ChatCompletionClient, Completer, CompletionRequest};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> CompletionRequest {
    CompletionRequest {
        model: String::from("gpt-3.5-turbo"),
        prompt: String::from("Convert the following code into pseudocode.\n\nx = 1"),
    }
}

/// **VALUE**: End-to-end check of the request the provider actually receives.
///
/// **WHY THIS MATTERS**: Unit tests cover the wire structs; this proves the client
/// posts them to the right path with bearer auth and reads the first choice back.
///
/// **BUG THIS CATCHES**: Would catch the endpoint join dropping `/v1`, a missing
/// `Authorization` header, or the prompt landing in a system message.
#[tokio::test]
async fn given_provider_returns_choice_when_completing_then_returns_text() {
    // GIVEN: A provider that expects one well-formed request
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": request().prompt}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("SET x TO 1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(&settings_for(&server)).unwrap();

    // WHEN: Completing
    let result = client.complete(&request()).await;

    // THEN: The first choice's content comes back unchanged
    assert_eq!(result.unwrap().text, "SET x TO 1");
}

#[tokio::test]
async fn given_provider_rejects_key_when_completing_then_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(&settings_for(&server)).unwrap();
    let result = client.complete(&request()).await;

    let err = result.unwrap_err();
    assert!(matches!(err, CompletionError::Auth { .. }), "got {err:?}");
    assert!(err.to_string().contains("Incorrect API key provided"));
}

/// **VALUE**: Throttling is reported as such and is not retried.
#[tokio::test]
async fn given_provider_throttles_when_completing_then_rate_limit_error_after_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(&settings_for(&server)).unwrap();
    let result = client.complete(&request()).await;

    assert!(matches!(result, Err(CompletionError::RateLimit { .. })));
    // expect(1) is verified when `server` drops
}

#[tokio::test]
async fn given_provider_fails_when_completing_then_provider_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(&settings_for(&server)).unwrap();
    let err = client.complete(&request()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.error_category(), "server_error");
}

#[tokio::test]
async fn given_success_without_choices_when_completing_then_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(&settings_for(&server)).unwrap();
    let result = client.complete(&request()).await;

    assert!(matches!(
        result,
        Err(CompletionError::Provider { status_code: None, .. })
    ));
}

#[tokio::test]
async fn given_unreachable_provider_when_completing_then_network_error() {
    // GIVEN: A base URL with nothing listening
    let settings = settings_for_uri(&closed_local_uri());

    let client = ChatCompletionClient::new(&settings).unwrap();

    // WHEN: Completing
    let result = client.complete(&request()).await;

    // THEN: Transport failure, not a provider error
    assert!(matches!(result, Err(CompletionError::Network { .. })), "got {result:?}");
}

/// **VALUE**: The configured timeout bounds the completion request.
///
/// **BUG THIS CATCHES**: Would catch `timeout_secs` being parsed and validated
/// but never handed to the HTTP client.
#[tokio::test]
async fn given_slow_provider_when_completing_with_short_timeout_then_timeout_error() {
    // GIVEN: A provider that answers after 3 s and settings with a 1 s timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let client = ChatCompletionClient::new(&settings_with_timeout(&server.uri(), 1)).unwrap();

    // WHEN: Completing
    let result = client.complete(&request()).await;

    // THEN: A network error flagged as a timeout
    let err = result.unwrap_err();
    assert!(
        matches!(err, CompletionError::Network { is_timeout: true, .. }),
        "got {err:?}"
    );
    assert_eq!(err.error_category(), "timeout");
}

//! Integration tests for the generation client against a mock Gemini server.
//!
//! Covers the full response contract: field passthrough on success, rejection
//! of missing/empty fields, empty responses, server errors, and the
//! fail-fast path when no credential is configured.

use conceptviz::config::GeminiConfig;
use conceptviz::gemini::{GeminiClient, GenerationError};
use conceptviz::models::ConceptQuery;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn query(text: &str) -> ConceptQuery {
    ConceptQuery::parse(text).unwrap()
}

fn client_for(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig::default()
        .with_api_key("test-key")
        .with_model("test-model")
        .with_base_url(server.uri());
    GeminiClient::new(config)
}

/// Envelope wrapping a structured-output payload the way Gemini returns it:
/// the artifact JSON is a string inside the first candidate part.
fn envelope_with(artifact_json: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": artifact_json.to_string() }]
            }
        }]
    })
}

#[tokio::test]
async fn test_successful_generation_passes_fields_through() {
    let mock_server = MockServer::start().await;

    let html = "<!DOCTYPE html><html><body><canvas></canvas></body></html>";
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_with(serde_json::json!({
                "title": "Lorenz Attractor",
                "explanation": "A chaotic system of three coupled equations.",
                "html": html,
            }))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let artifact = client.generate(&query("Lorenz Attractor")).await.unwrap();

    assert_eq!(artifact.title, "Lorenz Attractor");
    assert_eq!(
        artifact.explanation,
        "A chaotic system of three coupled equations."
    );
    assert_eq!(artifact.html, html);
}

#[tokio::test]
async fn test_request_carries_structured_output_contract() {
    let mock_server = MockServer::start().await;

    // The request must pin the response to JSON with all three required fields.
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "required": ["html", "explanation", "title"]
                }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_with(serde_json::json!({
                "title": "T",
                "explanation": "E",
                "html": "<html></html>",
            }))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.generate(&query("Fourier Series")).await.unwrap();
}

#[tokio::test]
async fn test_missing_required_field_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_with(serde_json::json!({
                "title": "T",
                "explanation": "E",
            }))),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(&query("Q")).await.unwrap_err();
    match err {
        GenerationError::Malformed { reason } => assert!(reason.contains("html")),
        other => panic!("Expected Malformed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_required_field_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_with(serde_json::json!({
                "title": "T",
                "explanation": "",
                "html": "<html></html>",
            }))),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(&query("Q")).await.unwrap_err();
    assert!(matches!(err, GenerationError::Malformed { .. }));
}

#[tokio::test]
async fn test_unparseable_output_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Sure! Here is your visualization:" }] }
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(&query("Q")).await.unwrap_err();
    assert!(matches!(err, GenerationError::Malformed { .. }));
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(&query("Q")).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_blank_text_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "   " }] }
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(&query("Q")).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_server_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(&query("Q")).await.unwrap_err();
    match err {
        GenerationError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("Expected Server, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_credential_makes_no_network_call() {
    let mock_server = MockServer::start().await;

    // Zero requests may reach the server when the key is absent.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = GeminiConfig::default()
        .with_model("test-model")
        .with_base_url(mock_server.uri());
    let client = GeminiClient::new(config);

    let err = client.generate(&query("Q")).await.unwrap_err();
    assert!(matches!(err, GenerationError::Configuration));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_identical_queries_issue_independent_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_with(serde_json::json!({
                "title": "T",
                "explanation": "E",
                "html": "<html></html>",
            }))),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.generate(&query("Q")).await.unwrap();
    client.generate(&query("Q")).await.unwrap();

    mock_server.verify().await;
}

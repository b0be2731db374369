// tests/suggestions.rs
//! Suggestion client tests against a mocked relay endpoint.

use resume_builder::ai::{GenerationError, SuggestionClient};
use resume_builder::types::ResumeDocument;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn relay_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "content": content,
        "model": "gemini-2.5-flash"
    }))
}

#[tokio::test]
async fn splits_relay_content_into_options() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .respond_with(relay_response("Option A\n---\nOption B\n---\n"))
        .expect(1)
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    let options = client
        .generate_professional_summary(&ResumeDocument::default(), 3)
        .await
        .unwrap();
    assert_eq!(options, vec!["Option A", "Option B"]);
}

#[tokio::test]
async fn sends_framed_prompt_with_default_model() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .and(body_partial_json(json!({ "model": "gemini-2.5-flash" })))
        .respond_with(relay_response("One"))
        .expect(1)
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    let mut doc = ResumeDocument::default();
    doc.set_job_title("Data Engineer".to_string());
    client.generate_professional_summary(&doc, 3).await.unwrap();

    let requests = relay.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("You are a professional resume writer"));
    assert!(prompt.contains("Generate 3 distinct"));
    assert!(prompt.contains("Data Engineer"));
}

#[tokio::test]
async fn skill_options_are_split_and_empties_filtered() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .respond_with(relay_response("Rust, , Tokio\n---\nSQL,Go"))
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    let lists = client
        .generate_skills_recommendations("Backend Engineer", &["Rust".to_string()], "tech", 3)
        .await
        .unwrap();
    assert_eq!(lists, vec![vec!["Rust", "Tokio"], vec!["SQL", "Go"]]);
}

#[tokio::test]
async fn cover_letter_returns_a_single_document() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .respond_with(relay_response("Dear Hiring Manager,\n\nI am excited to apply."))
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    let letter = client
        .generate_cover_letter(&ResumeDocument::default())
        .await
        .unwrap();
    assert_eq!(letter, "Dear Hiring Manager,\n\nI am excited to apply.");
}

#[tokio::test]
async fn job_description_uses_position_and_company() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .respond_with(relay_response("- Owned the ingestion pipeline"))
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    let description = client
        .generate_job_description("Data Engineer", "Acme")
        .await
        .unwrap();
    assert_eq!(description, "- Owned the ingestion pipeline");

    let requests = relay.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Position: Data Engineer"));
    assert!(prompt.contains("Company: Acme"));
}

async fn error_for_status(status: u16) -> GenerationError {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": "boom" })))
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    client
        .generate_professional_summary(&ResumeDocument::default(), 3)
        .await
        .unwrap_err()
}

#[tokio::test]
async fn maps_relay_statuses_to_error_kinds() {
    assert!(matches!(
        error_for_status(400).await,
        GenerationError::InvalidRequest
    ));
    assert!(matches!(
        error_for_status(429).await,
        GenerationError::RateLimit
    ));
    assert!(matches!(
        error_for_status(500).await,
        GenerationError::ServiceUnavailable
    ));
    assert!(matches!(
        error_for_status(503).await,
        GenerationError::ServiceUnavailable
    ));
    assert!(matches!(
        error_for_status(403).await,
        GenerationError::Unknown(_)
    ));
}

#[tokio::test]
async fn unreachable_relay_is_a_connectivity_error() {
    let client = SuggestionClient::new("http://127.0.0.1:1").unwrap();
    let err = client
        .generate_professional_summary(&ResumeDocument::default(), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Connectivity(_)));
    assert!(err.to_string().contains("check your internet connection"));
}

#[tokio::test]
async fn malformed_relay_body_is_an_unknown_error() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&relay)
        .await;

    let client = SuggestionClient::new(relay.uri()).unwrap();
    let err = client
        .generate_professional_summary(&ResumeDocument::default(), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Unknown(_)));
}

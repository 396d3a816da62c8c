//! HTTP-level tests for the Gemini topic generator.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thesis_topics::{
    CredentialAccess, CredentialStore, GeminiClient, SessionPhase, TopicGenerator, TopicSession,
    CREDENTIAL_MESSAGE,
};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn topics_text() -> String {
    json!({
        "topics": [
            {
                "title": "یادگیری فدرال در بیمارستان‌ها",
                "description": "آموزش مدل‌های تشخیصی بدون اشتراک داده.",
                "keywords": ["یادگیری فدرال", "حریم خصوصی"],
                "potentialResearchQuestions": ["داده‌های ناهمگون چه اثری دارند؟"]
            },
            {
                "title": "Explainable triage models",
                "description": "Interpretable ML for emergency departments.",
                "keywords": ["xai"]
            }
        ]
    })
    .to_string()
}

fn client(server: &MockServer, key: Option<&str>) -> (GeminiClient, CredentialStore) {
    let store = CredentialStore::new(key.map(str::to_string));
    (GeminiClient::new(store.clone(), MODEL, server.uri()), store)
}

#[tokio::test]
async fn test_generate_sends_schema_and_parses_topics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "key-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&topics_text())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server, Some("key-1"));
    let response = client.generate("machine learning, healthcare").await.unwrap();

    assert_eq!(response.len(), 2);
    assert_eq!(response.topics()[0].title(), "یادگیری فدرال در بیمارستان‌ها");
    assert!(response.topics()[1].potential_research_questions().is_none());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert_eq!(
        config["responseSchema"]["properties"]["topics"]["items"]["required"],
        json!(["title", "description", "keywords"])
    );
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("machine learning, healthcare"));
}

#[tokio::test]
async fn test_each_call_uses_the_current_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "old-key"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "new-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&topics_text())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client(&server, Some("old-key"));

    let err = client.generate("ai").await.unwrap_err();
    assert_eq!(err.to_string(), "Requested entity was not found.");

    store.replace("new-key");
    assert!(client.generate("ai").await.is_ok());
}

#[tokio::test]
async fn test_invalid_json_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Here you go: {")))
        .mount(&server)
        .await;

    let (client, _) = client(&server, Some("key"));
    let err = client.generate("ai").await.unwrap_err();

    assert!(err.is_parse());
}

#[tokio::test]
async fn test_missing_topics_is_a_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candidate_body(r#"{"suggestions": []}"#)),
        )
        .mount(&server)
        .await;

    let (client, _) = client(&server, Some("key"));
    let err = client.generate("ai").await.unwrap_err();

    assert!(err.is_shape());
}

#[tokio::test]
async fn test_invalid_key_is_a_credential_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{ "@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID" }]
            }
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server, Some("bad"));
    let err = client.generate("ai").await.unwrap_err();

    assert!(err.is_credential());
}

#[tokio::test]
async fn test_server_errors_propagate_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded. Please try again later.", "status": "UNAVAILABLE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server, Some("key"));
    let err = client.generate("ai").await.unwrap_err();

    assert!(err.is_service());
    assert_eq!(err.to_string(), "The model is overloaded. Please try again later.");
}

#[tokio::test]
async fn test_missing_key_never_reaches_the_service() {
    let server = MockServer::start().await;

    let (client, _) = client(&server, None);
    let err = client.generate("ai").await.unwrap_err();

    assert!(err.is_credential());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_not_found_drives_session_to_credential_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server, Some("stale-project-key"));
    let mut session = TopicSession::new(Arc::new(client), CredentialAccess::Unavailable);

    let phase = session.submit("robotics").await;

    assert_eq!(phase, SessionPhase::CredentialPromptShown);
    assert_eq!(session.error(), Some(CREDENTIAL_MESSAGE));
}

#[tokio::test]
async fn test_transport_error_text_reaches_the_session_unchanged() {
    let unreachable = || {
        GeminiClient::new(
            CredentialStore::new(Some("key".into())),
            MODEL,
            "http://127.0.0.1:1",
        )
    };

    let err = unreachable().generate("ai").await.unwrap_err();
    assert!(err.is_service());
    let message = err.to_string();
    assert!(message.starts_with("error sending request"), "{message}");
    assert!(!message.contains("Gemini request failed"), "{message}");

    let mut session = TopicSession::new(Arc::new(unreachable()), CredentialAccess::Unavailable);
    let phase = session.submit("ai").await;

    assert_eq!(phase, SessionPhase::Failure);
    assert_eq!(session.error(), Some(message.as_str()));
}

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::TopicGenerator;
use crate::connector::adapter::CredentialStore;
use crate::domain::{
    ApiResponse, CompletionRequest, DomainError, PromptBuilder, ResponseSchema, DEFAULT_MODEL,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODELS_PATH: &str = "/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub const PARSE_ERROR_MESSAGE: &str =
    "Failed to parse AI response. The generated content might not be valid JSON.";
pub const SHAPE_ERROR_MESSAGE: &str =
    "Invalid response format from Gemini API: \"topics\" array not found or invalid.";
const MISSING_KEY_MESSAGE: &str = "API key is not configured";

/// Gemini `generateContent` request payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a ResponseSchema,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Google API error envelope: `{"error": {"code", "message", "status", "details"}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

impl ApiError {
    fn is_credential_failure(&self, http_status: StatusCode) -> bool {
        matches!(
            http_status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) || matches!(self.status.as_str(), "UNAUTHENTICATED" | "PERMISSION_DENIED")
            || self
                .details
                .iter()
                .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
    }
}

/// [`TopicGenerator`] backed by the Gemini `generateContent` REST endpoint with
/// a JSON response schema.
///
/// The API key is read from the shared [`CredentialStore`] and a new HTTP client
/// is built on every call, so a key chosen through the selector takes effect on
/// the very next request. No retries and no timeout beyond the transport default.
///
/// Configuration via environment (see [`GeminiClient::from_env`]):
///
/// ```text
/// GEMINI_API_KEY=...            (or API_KEY)
/// GEMINI_MODEL=gemini-2.5-flash
/// GEMINI_BASE_URL=https://generativelanguage.googleapis.com
/// ```
pub struct GeminiClient {
    credentials: CredentialStore,
    prompt_builder: PromptBuilder,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        credentials: CredentialStore,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            credentials,
            prompt_builder: PromptBuilder::new(model),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// | Variable          | Default                                      |
    /// |-------------------|----------------------------------------------|
    /// | `GEMINI_MODEL`    | `gemini-2.5-flash`                           |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com`  |
    pub fn from_env(credentials: CredentialStore) -> Self {
        Self::with_overrides(credentials, None, None)
    }

    /// Like [`GeminiClient::from_env`], but explicit values take precedence.
    pub fn with_overrides(
        credentials: CredentialStore,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let model = non_blank(model)
            .or_else(|| non_blank(std::env::var("GEMINI_MODEL").ok()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base = non_blank(base_url)
            .or_else(|| non_blank(std::env::var("GEMINI_BASE_URL").ok()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(credentials, model, base)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}{MODELS_PATH}/{model}:generateContent", self.base_url)
    }

    /// Sends one completion request and returns the model's raw text output.
    async fn send(&self, request: &CompletionRequest, api_key: &str) -> Result<String, DomainError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: request.prompt(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type(),
                response_schema: request.response_schema(),
            },
        };

        let response = reqwest::Client::new()
            .post(self.endpoint(request.model()))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!("GeminiClient: failed to read error body: {e}");
                    String::new()
                }
            };
            warn!("GeminiClient: API returned {status}: {text}");
            return Err(Self::error_from_body(status, &text));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            DomainError::service(format!("Gemini returned an unreadable response: {e}"))
        })?;

        Ok(payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }

    /// Maps a non-success response onto the error taxonomy, keeping the
    /// service's own message text intact.
    fn error_from_body(status: StatusCode, body: &str) -> DomainError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let message = if envelope.error.message.is_empty() {
                    format!("Gemini API returned {status}")
                } else {
                    envelope.error.message.clone()
                };
                if envelope.error.is_credential_failure(status) {
                    DomainError::credential(message)
                } else {
                    DomainError::service(message)
                }
            }
            Err(_) if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                DomainError::credential(format!("Gemini API returned {status}"))
            }
            Err(_) => DomainError::service(format!("Gemini API returned {status}")),
        }
    }

    /// Parses the model's text into topics.
    ///
    /// Invalid JSON is a [`DomainError::Parse`]; valid JSON without a usable
    /// `topics` array is a [`DomainError::Shape`].
    pub fn parse_topics(text: &str) -> Result<ApiResponse, DomainError> {
        let value: serde_json::Value = serde_json::from_str(text.trim()).map_err(|e| {
            debug!("GeminiClient: response is not JSON ({e}): {text}");
            DomainError::parse(PARSE_ERROR_MESSAGE)
        })?;

        if !value.get("topics").is_some_and(|t| t.is_array()) {
            return Err(DomainError::shape(SHAPE_ERROR_MESSAGE));
        }

        serde_json::from_value(value).map_err(|e| {
            debug!("GeminiClient: topics do not match the schema: {e}");
            DomainError::shape(SHAPE_ERROR_MESSAGE)
        })
    }
}

/// Treats an unset, empty or whitespace-only setting as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl TopicGenerator for GeminiClient {
    async fn generate(&self, keywords: &str) -> Result<ApiResponse, DomainError> {
        let api_key = self
            .credentials
            .current()
            .ok_or_else(|| DomainError::credential(MISSING_KEY_MESSAGE))?;

        let request = self.prompt_builder.build(keywords);
        debug!("GeminiClient: requesting topics from {}", request.model());

        let text = self.send(&request, &api_key).await?;
        debug!("GeminiClient raw response: {text}");

        Self::parse_topics(&text)
    }

    fn model_name(&self) -> &str {
        self.prompt_builder.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_topics_accepts_schema_conforming_json() {
        let text = r#"
            {"topics": [
                {"title": "A", "description": "d", "keywords": ["x"]},
                {"title": "B", "description": "d", "keywords": [], "potentialResearchQuestions": ["q?"]}
            ]}
        "#;
        let response = GeminiClient::parse_topics(text).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.topics()[1].title(), "B");
    }

    #[test]
    fn parse_topics_rejects_invalid_json() {
        let err = GeminiClient::parse_topics("```json\n{oops").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.to_string(), PARSE_ERROR_MESSAGE);
    }

    #[test]
    fn parse_topics_rejects_missing_topics() {
        let err = GeminiClient::parse_topics(r#"{"ideas": []}"#).unwrap_err();
        assert!(err.is_shape());

        let err = GeminiClient::parse_topics(r#"{"topics": "none"}"#).unwrap_err();
        assert!(err.is_shape());

        let err = GeminiClient::parse_topics("[]").unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn parse_topics_rejects_malformed_items() {
        let err = GeminiClient::parse_topics(r#"{"topics": [{"title": 3}]}"#).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn error_from_body_keeps_service_message() {
        let body = r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#;
        let err = GeminiClient::error_from_body(StatusCode::NOT_FOUND, body);
        assert!(err.is_service());
        assert_eq!(err.to_string(), "Requested entity was not found.");
    }

    #[test]
    fn error_from_body_detects_invalid_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT",
            "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]}}"#;
        let err = GeminiClient::error_from_body(StatusCode::BAD_REQUEST, body);
        assert!(err.is_credential());
    }

    #[test]
    fn error_from_body_handles_unstructured_bodies() {
        let err = GeminiClient::error_from_body(StatusCode::FORBIDDEN, "<html>denied</html>");
        assert!(err.is_credential());

        let err = GeminiClient::error_from_body(StatusCode::BAD_GATEWAY, "");
        assert!(err.is_service());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(CredentialStore::default(), "m", "http://localhost:8080/");
        assert_eq!(
            client.endpoint("m"),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn non_blank_drops_empty_and_whitespace_values() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("  \t".into())), None);
        assert_eq!(non_blank(Some("gemini-x".into())), Some("gemini-x".into()));
    }

    #[test]
    fn with_overrides_ignores_blank_values() {
        let client = GeminiClient::with_overrides(
            CredentialStore::default(),
            Some("  ".into()),
            Some(String::new()),
        );
        assert!(!client.model_name().trim().is_empty());
        let endpoint = client.endpoint(client.model_name());
        assert!(endpoint.starts_with("http"), "{endpoint}");
        assert!(!endpoint.contains("models/:generateContent"), "{endpoint}");
    }
}

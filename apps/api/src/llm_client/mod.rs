/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for both pipeline stages.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Options for a single completion call.
///
/// Setting `response_schema` switches the call into structured output mode:
/// the provider is asked for `application/json` constrained to the schema.
/// The schema is advisory to the model — callers still parse and validate.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub response_schema: Option<Value>,
}

impl CompletionOptions {
    pub fn structured(schema: Value) -> Self {
        Self {
            response_schema: Some(schema),
        }
    }
}

/// The completion seam the pipeline stages depend on.
///
/// Carried in `AppState` as `Arc<dyn Completion>` so tests can swap in a
/// recording mock without touching stage or handler code.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Sends one request and returns the model's raw text content.
    /// Fails with `LlmError::EmptyContent` when the provider returns no text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Extracts the first candidate's first text part.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by both pipeline stages.
///
/// One awaited network call per invocation — no retry, no timeout, no
/// streaming. A failed call ends the surrounding pipeline run.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Completion for LlmClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        let generation_config = options
            .response_schema
            .as_ref()
            .map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            });

        let request_body = GenerateContentRequest {
            system_instruction: RequestContent {
                role: None,
                parts: vec![RequestPart { text: system }],
            },
            contents: vec![RequestContent {
                role: Some("user"),
                parts: vec![RequestPart { text: user }],
            }],
            generation_config,
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        match llm_response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(LlmError::EmptyContent),
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Structured output mode is advisory, so fences still show up occasionally.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"company\": \"Acme Corp\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"company\": \"Acme Corp\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"company\": \"Acme Corp\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"company\": \"Acme Corp\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"company\": \"Acme Corp\"}";
        assert_eq!(strip_json_fences(input), "{\"company\": \"Acme Corp\"}");
    }

    #[test]
    fn test_response_text_picks_first_text_part() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello"}, {"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("hello"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_structured_options_carry_schema() {
        let options = CompletionOptions::structured(serde_json::json!({"type": "OBJECT"}));
        assert!(options.response_schema.is_some());
        assert!(CompletionOptions::default().response_schema.is_none());
    }
}

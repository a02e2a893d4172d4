use std::env;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, Message};

const API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Low temperature keeps summaries close to the source text.
pub const TEMPERATURE: f32 = 0.4;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY not found in environment. Set it or add it to a .env file.")]
    ApiKeyNotSet,

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("model returned no message")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Single-turn text completion.
/// Implemented by `OpenAiClient` for production; mock implementations used in tests.
pub trait CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Configuration via environment variables:
/// - `OPENAI_API_KEY`: required
/// - `OPENAI_MODEL`: model id (default `gpt-4o-mini`)
/// - `OPENAI_BASE_URL`: API root (default `https://api.openai.com/v1`)
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn from_env(http: Client) -> Result<Self, LlmError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| LlmError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(LlmError::ApiKeyNotSet);
        }
        let model = non_empty_var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_empty_var("OPENAI_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| API_BASE.to_string());
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            model,
            base_url,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, prompt: &str) -> Result<ChatCompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ChatCompletionResponse>(&text).ok();
            let classified = match body.as_ref().and_then(|b| b.error.as_ref()) {
                Some(err) => classify_api_error(status.as_u16(), err),
                None => {
                    let end = text.floor_char_boundary(200);
                    classify_status(status.as_u16(), format!("HTTP {status}: {}", &text[..end]))
                }
            };
            warn!(error = %classified, "chat completion failed");
            return Err(classified);
        }

        let body: ChatCompletionResponse = response.json().await?;
        debug!(model = %self.model, "chat completion complete");

        if let Some(err) = &body.error {
            let classified = classify_api_error(status.as_u16(), err);
            warn!(error = %classified, "API error in 200 response");
            return Err(classified);
        }

        Ok(body)
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.chat(prompt).await?;
        extract_answer(response).ok_or(LlmError::EmptyResponse)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First choice's message content, verbatim (an empty string included).
fn extract_answer(response: ChatCompletionResponse) -> Option<String> {
    response.choices?.into_iter().next()?.message?.content
}

fn classify_api_error(status: u16, err: &ApiError) -> LlmError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());
    if err.is_quota() {
        return LlmError::QuotaExhausted(message);
    }
    classify_status(status, message)
}

fn classify_status(status: u16, message: String) -> LlmError {
    match status {
        401 => LlmError::Unauthorized(message),
        429 => LlmError::RateLimited,
        code => LlmError::Api { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::Choice;

    fn api_error(kind: &str, code: Option<&str>) -> ApiError {
        ApiError {
            message: Some("details".into()),
            kind: Some(kind.into()),
            code: code.map(|c| serde_json::Value::String(c.into())),
        }
    }

    #[test]
    fn classify_429_as_rate_limited() {
        let err = api_error("requests", Some("rate_limit_exceeded"));
        assert!(matches!(classify_api_error(429, &err), LlmError::RateLimited));
    }

    #[test]
    fn classify_insufficient_quota() {
        let err = api_error("insufficient_quota", Some("insufficient_quota"));
        assert!(matches!(
            classify_api_error(429, &err),
            LlmError::QuotaExhausted(_)
        ));
    }

    #[test]
    fn classify_401_as_unauthorized() {
        let err = api_error("invalid_request_error", Some("invalid_api_key"));
        assert!(matches!(
            classify_api_error(401, &err),
            LlmError::Unauthorized(_)
        ));
    }

    #[test]
    fn classify_500_as_generic_api_error() {
        match classify_api_error(500, &api_error("server_error", None)) {
            LlmError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "details");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn extract_answer_takes_first_choice() {
        let response = ChatCompletionResponse {
            choices: Some(vec![
                Choice {
                    message: Some(Message {
                        role: "assistant".into(),
                        content: Some("first".into()),
                    }),
                },
                Choice {
                    message: Some(Message {
                        role: "assistant".into(),
                        content: Some("second".into()),
                    }),
                },
            ]),
            error: None,
        };
        assert_eq!(extract_answer(response).as_deref(), Some("first"));
    }

    #[test]
    fn extract_answer_handles_missing_content() {
        let response = ChatCompletionResponse {
            choices: Some(vec![Choice { message: None }]),
            error: None,
        };
        assert!(extract_answer(response).is_none());

        let response = ChatCompletionResponse {
            choices: None,
            error: None,
        };
        assert!(extract_answer(response).is_none());
    }

    #[test]
    fn extract_answer_keeps_empty_content() {
        let response = ChatCompletionResponse {
            choices: Some(vec![Choice {
                message: Some(Message {
                    role: "assistant".into(),
                    content: Some(String::new()),
                }),
            }]),
            error: None,
        };
        assert_eq!(extract_answer(response).as_deref(), Some(""));
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let client = OpenAiClient::with_base_url(Client::new(), "http://localhost");
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-key"), "got: {debug}");
        assert!(debug.contains("[REDACTED]"));
    }
}

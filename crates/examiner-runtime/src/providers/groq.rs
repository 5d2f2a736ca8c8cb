//! Groq provider (OpenAI-compatible chat completions).
//!
//! Any endpoint speaking the OpenAI `chat/completions` dialect works with a
//! custom base URL; Groq is the default.

use super::{
    secrets::{ApiCredential, CredentialSource},
    ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError, TokenUsage,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable name for the Groq API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default API root for Groq's OpenAI-compatible endpoint.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Longest error body excerpt carried into a [`ProviderError`].
const MAX_ERROR_EXCERPT: usize = 200;

/// Groq chat-completion provider.
pub struct GroqProvider {
    credential: ApiCredential,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GroqProvider {
    /// Create a provider around an already-loaded credential.
    pub fn new(credential: ApiCredential) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credential,
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            client,
        })
    }

    /// Create a provider from a raw key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new(ApiCredential::new(
            api_key,
            CredentialSource::Programmatic,
            "Groq API key",
        ))
    }

    /// Create from the `GROQ_API_KEY` environment variable.
    ///
    /// The environment variable value is not logged.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(ApiCredential::from_env(GROQ_API_KEY_ENV, "Groq API key")?)
    }

    /// Set custom base URL. Trailing slashes are ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// OpenAI-compatible request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: &'a [ChatMessage],
}

/// OpenAI-compatible response envelope.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    /// Diagnostics only. Decoded leniently so an odd counter never costs
    /// a completion.
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Best-effort read of the `usage` block. Missing, null or non-integer
/// counters read as zero.
fn token_usage(usage: Option<&serde_json::Value>) -> TokenUsage {
    let counter = |name: &str| {
        usage
            .and_then(|u| u.get(name))
            .and_then(serde_json::Value::as_u64)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
    };

    TokenUsage {
        prompt_tokens: counter("prompt_tokens"),
        completion_tokens: counter("completion_tokens"),
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Pull a human-readable message out of an error body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.error.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }

    trimmed.chars().take(MAX_ERROR_EXCERPT).collect()
}

#[async_trait]
impl LlmProvider for GroqProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError> {
        let request = ChatCompletionRequest {
            model: &config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            messages: &messages,
        };

        // SECURITY: Only expose the credential here, at the point of use
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.credential.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(config.timeout)
                } else {
                    // without_url keeps the endpoint out of client-facing messages
                    ProviderError::HttpError(e.without_url().to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(ProviderError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(config.timeout)
            } else {
                ProviderError::ParseError(e.without_url().to_string())
            }
        })?;

        let usage = token_usage(body.usage.as_ref());

        let first = body
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyCompletion)?;

        let content = first
            .message
            .and_then(|m| m.content)
            .ok_or(ProviderError::EmptyCompletion)?;

        Ok(CompletionResponse {
            content,
            usage,
            model: body.model.unwrap_or_else(|| config.model.clone()),
            stop_reason: first.finish_reason,
        })
    }

    fn is_configured(&self) -> bool {
        !self.credential.is_empty()
    }

    fn name(&self) -> &str {
        "groq"
    }
}

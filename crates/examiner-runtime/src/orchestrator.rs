//! Evaluation orchestrator.
//!
//! Runs one evaluation request through the pipeline:
//!
//! ```text
//! Validating -> BuildingPrompt -> Calling -> Parsing -> Validated
//!     |                              |          |
//!  Rejected                   UpstreamFailed  ParseFailed
//! ```
//!
//! Every failure leaves as an [`EvaluationError`]. Requests share no mutable
//! state; the provider is read-only behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use examiner_core::{
    parse_evaluation, validate_request, EvaluationError, EvaluationRequest, EvaluationResult,
};
use serde_json::Value as JsonValue;

use crate::config::OracleConfig;
use crate::prompts::build_messages;
use crate::providers::{
    ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError,
};
use crate::resilience::with_retry;

/// Orchestrates a single evaluation against the scoring oracle.
///
/// `provider` is `None` when no oracle credential was configured at startup.
/// The orchestrator still constructs so the process can serve health checks
/// and reject each evaluation with [`EvaluationError::Configuration`].
pub struct EvaluationOrchestrator {
    provider: Option<Arc<dyn LlmProvider>>,
    config: OracleConfig,
}

impl EvaluationOrchestrator {
    /// Create a new orchestrator.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, config: OracleConfig) -> Self {
        Self { provider, config }
    }

    /// Create an orchestrator with no oracle. Every evaluation fails with
    /// [`EvaluationError::Configuration`].
    pub fn unconfigured(config: OracleConfig) -> Self {
        Self::new(None, config)
    }

    /// Whether an oracle with a usable credential is available.
    pub fn is_configured(&self) -> bool {
        self.configured_provider().is_some()
    }

    fn configured_provider(&self) -> Option<&Arc<dyn LlmProvider>> {
        self.provider.as_ref().filter(|p| p.is_configured())
    }

    /// Validate an untrusted payload, then evaluate it.
    ///
    /// Invalid payloads are rejected before the oracle is touched.
    pub async fn evaluate_payload(
        &self,
        payload: &JsonValue,
    ) -> Result<EvaluationResult, EvaluationError> {
        let request = validate_request(payload).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected evaluation request");
        })?;
        self.evaluate(&request).await
    }

    /// Evaluate a validated request.
    ///
    /// # Execution Flow
    /// 1. Credential check (no I/O when absent)
    /// 2. Render prompt (deterministic)
    /// 3. Call the oracle under the configured timeout
    /// 4. Strict parse + schema validation of the completion
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        let Some(provider) = self.configured_provider() else {
            tracing::error!("Scoring oracle credential is not configured");
            return Err(EvaluationError::Configuration);
        };

        let messages = build_messages(request);
        let completion_config = self.config.completion_config();

        tracing::debug!(
            provider = provider.name(),
            model = %completion_config.model,
            max_marks = request.max_marks,
            estimated_prompt_tokens = messages
                .iter()
                .map(|m| provider.estimate_tokens(&m.content))
                .sum::<u32>(),
            "Calling scoring oracle"
        );

        let response = self
            .call_oracle(provider, messages, &completion_config)
            .await
            .map_err(|e| {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    status = ?e.status(),
                    "Scoring oracle call failed"
                );
                EvaluationError::Upstream {
                    status: e.status(),
                    message: e.to_string(),
                }
            })?;

        tracing::debug!(
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            stop_reason = ?response.stop_reason,
            "Scoring oracle responded"
        );

        let parsed = parse_evaluation(&response.content, request.max_marks).map_err(|e| {
            tracing::warn!(
                error = %e,
                raw_len = response.content.len(),
                "Oracle output violated the response contract"
            );
            tracing::debug!(raw = %response.content, "Unparseable oracle output");
            EvaluationError::parse(e, response.content.as_str())
        })?;

        for deviation in &parsed.deviations {
            tracing::warn!(deviation = %deviation, "Oracle output corrected");
        }

        Ok(parsed.result)
    }

    /// Call the oracle, bounding every attempt by the configured timeout.
    async fn call_oracle(
        &self,
        provider: &Arc<dyn LlmProvider>,
        messages: Vec<ChatMessage>,
        completion_config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError> {
        let timeout = self.config.timeout;

        with_retry(&self.config.retry, || {
            let provider = Arc::clone(provider);
            let messages = messages.clone();
            let completion_config = completion_config.clone();
            async move { call_once(provider.as_ref(), messages, &completion_config, timeout).await }
        })
        .await
    }
}

async fn call_once(
    provider: &dyn LlmProvider,
    messages: Vec<ChatMessage>,
    completion_config: &CompletionConfig,
    timeout: Duration,
) -> Result<CompletionResponse, ProviderError> {
    match tokio::time::timeout(timeout, provider.complete(messages, completion_config)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    }
}

impl std::fmt::Debug for EvaluationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationOrchestrator")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for EvaluationOrchestrator.
#[derive(Default)]
pub struct EvaluationOrchestratorBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    config: OracleConfig,
}

impl EvaluationOrchestratorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the oracle provider.
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: OracleConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the orchestrator. A missing provider is allowed and surfaces as
    /// [`EvaluationError::Configuration`] per request.
    pub fn build(self) -> EvaluationOrchestrator {
        EvaluationOrchestrator::new(self.provider, self.config)
    }
}

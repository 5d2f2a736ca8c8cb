//! Application state and service initialization
//!
//! Builds the orchestrator from configuration once at startup. Handlers only
//! ever see the finished [`AppState`].

use std::sync::Arc;

use examiner_runtime::{
    ApiCredential, EvaluationOrchestrator, GroqProvider, LlmProvider, OracleConfig,
    GROQ_API_KEY_ENV,
};

use crate::config::ServerConfig;

/// Shared, read-only state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Evaluation pipeline
    pub orchestrator: Arc<EvaluationOrchestrator>,
    /// Whether parse failures echo the oracle's raw text to clients
    pub expose_raw_output: bool,
}

impl AppState {
    pub fn new(orchestrator: EvaluationOrchestrator, expose_raw_output: bool) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            expose_raw_output,
        }
    }

    /// Build state from server configuration and the process environment.
    ///
    /// A missing oracle credential is not fatal: the server starts, reports
    /// not-ready, and answers each evaluation with a configuration error.
    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let provider = load_provider(config)?;
        let orchestrator = EvaluationOrchestrator::new(provider, config.oracle_config());
        Ok(Self::new(orchestrator, config.expose_raw_output))
    }

    /// State around an injected provider. Used by tests and embedders.
    pub fn with_provider(
        provider: Arc<dyn LlmProvider>,
        oracle_config: OracleConfig,
        expose_raw_output: bool,
    ) -> Self {
        Self::new(
            EvaluationOrchestrator::new(Some(provider), oracle_config),
            expose_raw_output,
        )
    }
}

fn load_provider(config: &ServerConfig) -> Result<Option<Arc<dyn LlmProvider>>, AppError> {
    let credential = match ApiCredential::from_env(GROQ_API_KEY_ENV, "Groq API key") {
        Ok(credential) => credential,
        Err(e) => {
            tracing::warn!(error = %e, "Scoring oracle credential missing, evaluations will fail");
            return Ok(None);
        }
    };

    if credential.is_empty() {
        tracing::warn!(
            credential = %credential,
            "Scoring oracle credential is empty, evaluations will fail"
        );
    }

    let provider = GroqProvider::new(credential)
        .map_err(|e| AppError::ProviderInit(e.to_string()))?
        .with_base_url(config.oracle_url.clone());

    tracing::info!(
        provider = provider.name(),
        base_url = provider.base_url(),
        model = %config.model,
        "Scoring oracle configured"
    );

    Ok(Some(Arc::new(provider)))
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// The HTTP client for the oracle could not be built
    #[error("Failed to initialize scoring oracle: {0}")]
    ProviderInit(String),
}

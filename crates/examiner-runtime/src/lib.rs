//! # examiner-runtime
//!
//! LLM-backed answer evaluation.
//!
//! This crate turns a validated [`examiner_core::EvaluationRequest`] into an
//! [`examiner_core::EvaluationResult`] by asking a scoring oracle (an
//! OpenAI-compatible chat-completion service) and enforcing the response
//! contract from `examiner-core` on whatever comes back.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use examiner_runtime::{EvaluationOrchestrator, GroqProvider, OracleConfig};
//!
//! let provider = GroqProvider::from_env()?;
//! let orchestrator = EvaluationOrchestrator::new(Some(Arc::new(provider)), OracleConfig::default());
//!
//! let result = orchestrator
//!     .evaluate_payload(&serde_json::json!({
//!         "question": "Explain separation of powers.",
//!         "answer": "Power is divided between the three organs of state...",
//!         "maxMarks": 10
//!     }))
//!     .await?;
//! println!("{} / {}", result.score, result.max_score);
//! ```

pub mod config;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod resilience;

pub use config::{OracleConfig, RetryConfig};
pub use orchestrator::{EvaluationOrchestrator, EvaluationOrchestratorBuilder};
pub use providers::{
    ApiCredential, ChatMessage, CompletionConfig, CompletionResponse, CredentialSource,
    LlmProvider, ProviderError, TokenUsage,
};

#[cfg(feature = "groq")]
pub use providers::{GroqProvider, DEFAULT_GROQ_BASE_URL, GROQ_API_KEY_ENV};

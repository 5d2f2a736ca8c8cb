//! # examiner-core
//!
//! Deterministic building blocks for LLM-assisted answer evaluation.
//!
//! This crate answers two questions without doing any I/O:
//! - Is this evaluation request well-formed?
//! - Does this oracle completion honour the output contract?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No LLM calls**: The oracle lives in `examiner-runtime`
//! 3. **Strict boundary**: Completions are schema-validated before any field is read
//! 4. **No partial results**: Either a full [`EvaluationResult`] or a classified error
//!
//! ## Example
//!
//! ```rust
//! use examiner_core::{parse_evaluation, validate_request};
//!
//! let request = validate_request(&serde_json::json!({
//!     "question": "Explain separation of powers.",
//!     "answer": "Power is divided between three organs of state...",
//! }))?;
//! assert_eq!(request.max_marks, 15.0);
//!
//! let parsed = parse_evaluation(
//!     r#"{"score":17,"max_score":15,"strengths":[],"weaknesses":[],"improvements":[]}"#,
//!     request.max_marks,
//! )
//! .expect("valid completion");
//! assert_eq!(parsed.result.score, 15.0);
//! # Ok::<(), examiner_core::EvaluationError>(())
//! ```

pub mod request;
pub mod response;
pub mod types;

pub use request::validate_request;
pub use response::{parse_evaluation, ParsedEvaluation, ResponseError};
pub use types::{
    format_marks, ContractDeviation, EvaluationRequest, EvaluationResult, DEFAULT_MAX_MARKS,
};

use std::fmt;
use thiserror::Error;

/// The failure taxonomy for an evaluation request.
///
/// Every failure on the pipeline is converted into one of these kinds before
/// it leaves the orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Missing or malformed question, answer or maxMarks.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The oracle credential is absent. Deliberately carries no detail.
    #[error("Scoring oracle is not configured")]
    Configuration,

    /// Network failure, timeout, non-2xx status or empty completion envelope.
    #[error("Scoring oracle failed: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The completion was not valid JSON or lacked required numeric fields.
    #[error("Could not parse oracle output: {reason}")]
    Parse { reason: String, raw: String },
}

impl EvaluationError {
    /// Build a parse failure that keeps the raw completion for diagnostics.
    pub fn parse(error: ResponseError, raw: impl Into<String>) -> Self {
        EvaluationError::Parse {
            reason: error.to_string(),
            raw: raw.into(),
        }
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluationError::InvalidInput(_) => ErrorKind::InvalidInput,
            EvaluationError::Configuration => ErrorKind::Configuration,
            EvaluationError::Upstream { .. } => ErrorKind::Upstream,
            EvaluationError::Parse { .. } => ErrorKind::Parse,
        }
    }
}

/// Coarse error classification, stable for logs and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    Configuration,
    Upstream,
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::Parse => "parse_error",
        }
    }

    /// Whether the caller, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::InvalidInput)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

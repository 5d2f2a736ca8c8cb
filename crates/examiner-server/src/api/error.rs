//! Unified API error handling
//!
//! Maps the evaluation error taxonomy onto HTTP status codes and the
//! `{ error, details?, raw? }` body the frontend expects.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpResponse, ResponseError};
use examiner_core::{EvaluationError, ErrorKind};
use serde::Serialize;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error summary
    pub error: String,
    /// Diagnostic detail, when safe to disclose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unparseable oracle output, on parse failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// API error wrapping an evaluation failure.
///
/// `expose_raw` controls whether parse failures echo the oracle's raw text.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct ApiError {
    source: EvaluationError,
    expose_raw: bool,
}

impl ApiError {
    pub fn new(source: EvaluationError, expose_raw: bool) -> Self {
        Self { source, expose_raw }
    }

    /// A 400 for a body actix could not extract as JSON.
    pub fn rejected_body(err: &JsonPayloadError) -> Self {
        let message = match err {
            JsonPayloadError::ContentType => "Content-Type must be application/json",
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                "request body is too large"
            }
            _ => "request body must be valid JSON",
        };
        Self::new(EvaluationError::InvalidInput(message.to_string()), false)
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    fn body(&self) -> ErrorResponse {
        match &self.source {
            EvaluationError::InvalidInput(message) => ErrorResponse {
                error: message.clone(),
                details: None,
                raw: None,
            },
            EvaluationError::Configuration => ErrorResponse {
                error: "Evaluation service is not configured".to_string(),
                details: None,
                raw: None,
            },
            EvaluationError::Upstream { message, .. } => ErrorResponse {
                error: "Failed to evaluate answer".to_string(),
                details: Some(message.clone()),
                raw: None,
            },
            EvaluationError::Parse { reason, raw } => ErrorResponse {
                error: "Failed to parse evaluation from model".to_string(),
                details: Some(reason.clone()),
                raw: self.expose_raw.then(|| raw.clone()),
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.kind().is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let kind = self.kind();

        if status.is_server_error() {
            tracing::error!(
                error_type = kind.as_str(),
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::info!(
                error_type = kind.as_str(),
                status = status.as_u16(),
                message = %self,
                "Rejected request"
            );
        }

        HttpResponse::build(status).json(self.body())
    }
}

//! HTTP API for answer evaluation.

pub mod error;
pub mod evaluate;
pub mod health;

use actix_web::web;

pub use error::{ApiError, ErrorResponse};

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configure all routes.
///
/// Malformed or non-JSON bodies get the same `{ error }` shape as any other
/// invalid input instead of actix's plain-text default.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected malformed request body");
            ApiError::rejected_body(&err).into()
        });

    cfg.app_data(json_config)
        .service(evaluate::index)
        .service(evaluate::evaluate)
        .service(health::liveness)
        .service(health::readiness);
}

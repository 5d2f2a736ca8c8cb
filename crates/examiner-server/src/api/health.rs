//! Health check endpoints for liveness and readiness probes

use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    pub oracle: String,
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running.
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe endpoint
///
/// Returns 200 OK only when a scoring oracle credential is configured.
/// Does not call the oracle.
#[get("/health/ready")]
pub async fn readiness(state: web::Data<AppState>) -> impl Responder {
    let configured = state.orchestrator.is_configured();

    let status = ReadinessStatus {
        status: if configured { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        oracle: if configured { "configured" } else { "missing_credential" }.to_string(),
    };

    if configured {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

//! Answer evaluation endpoint

use actix_web::{get, post, web, HttpResponse};
use serde_json::Value as JsonValue;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::app::AppState;

/// Evaluate a candidate's answer
///
/// Body: `{ "question": string, "answer": string, "maxMarks"?: number }`.
/// Responds with the evaluation, or `{ error, details?, raw? }` on failure.
#[post("/api/evaluate")]
pub async fn evaluate(
    state: web::Data<AppState>,
    payload: web::Json<JsonValue>,
) -> Result<HttpResponse, ApiError> {
    let span = tracing::info_span!("evaluate", request_id = %Uuid::new_v4());

    async move {
        let result = state
            .orchestrator
            .evaluate_payload(&payload)
            .await
            .map_err(|e| ApiError::new(e, state.expose_raw_output))?;

        tracing::info!(
            score = result.score,
            max_score = result.max_score,
            strengths = result.strengths.len(),
            weaknesses = result.weaknesses.len(),
            improvements = result.improvements.len(),
            "Evaluation completed"
        );

        Ok::<_, ApiError>(HttpResponse::Ok().json(result))
    }
    .instrument(span)
    .await
}

/// Root banner, kept for uptime checks that probe `/`.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Answer examiner API running")
}

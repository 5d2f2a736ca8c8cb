//! Strict parsing of oracle completions into evaluation results.
//!
//! The completion text is foreign input. It is decoded as JSON exactly as
//! received (no searching for embedded objects), checked against the schema,
//! and only then read.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{ContractDeviation, EvaluationResult};

use super::schema::validate_evaluation_schema;

/// Reasons a completion could not be turned into a result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseError {
    #[error("Completion is not valid JSON: {0}")]
    NotJson(String),

    #[error("Completion violates the evaluation schema: {}", .0.join("; "))]
    SchemaViolation(Vec<String>),

    #[error("max_score must be positive, got {0}")]
    NonPositiveMaxScore(f64),
}

/// A validated result plus the irregularities corrected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvaluation {
    pub result: EvaluationResult,
    pub deviations: Vec<ContractDeviation>,
}

/// Shape of a schema-valid completion.
#[derive(Debug, Deserialize)]
struct OracleEvaluation {
    score: f64,
    max_score: f64,
    #[serde(default)]
    strengths: Option<Vec<String>>,
    #[serde(default)]
    weaknesses: Option<Vec<String>>,
    #[serde(default)]
    improvements: Option<Vec<String>>,
}

/// Parse and validate raw oracle text against the requested maximum.
///
/// # Contract
/// - The whole text must be a JSON document; prose around JSON is rejected
/// - `score` and `max_score` must be numbers, and `max_score` must be positive
/// - Absent or `null` feedback lists become empty lists
/// - A differing `max_score` is kept and reported as a deviation
/// - `score` is clamped into `[0, max_score]` and reported if it moved
///
/// Pure function of its inputs: the same text always yields the same outcome.
pub fn parse_evaluation(
    raw: &str,
    expected_max_score: f64,
) -> Result<ParsedEvaluation, ResponseError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ResponseError::NotJson(e.to_string()))?;

    validate_evaluation_schema(&value).map_err(ResponseError::SchemaViolation)?;

    let decoded: OracleEvaluation = serde_json::from_value(value)
        .map_err(|e| ResponseError::SchemaViolation(vec![e.to_string()]))?;

    if decoded.max_score <= 0.0 {
        return Err(ResponseError::NonPositiveMaxScore(decoded.max_score));
    }

    let mut deviations = Vec::new();

    if decoded.max_score != expected_max_score {
        deviations.push(ContractDeviation::MaxScoreMismatch {
            expected: expected_max_score,
            actual: decoded.max_score,
        });
    }

    let score = clamp_score(decoded.score, decoded.max_score);
    if score != decoded.score {
        deviations.push(ContractDeviation::ScoreClamped {
            original: decoded.score,
            clamped: score,
        });
    }

    Ok(ParsedEvaluation {
        result: EvaluationResult {
            score,
            max_score: decoded.max_score,
            strengths: decoded.strengths.unwrap_or_default(),
            weaknesses: decoded.weaknesses.unwrap_or_default(),
            improvements: decoded.improvements.unwrap_or_default(),
        },
        deviations,
    })
}

/// Clamp a score into `[0, max_score]`.
pub fn clamp_score(score: f64, max_score: f64) -> f64 {
    score.max(0.0).min(max_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROUND_TRIP: &str = r#"{"score":12,"max_score":15,"strengths":["clear structure"],"weaknesses":[],"improvements":["add examples"]}"#;

    #[test]
    fn test_round_trip_unchanged() {
        let parsed = parse_evaluation(ROUND_TRIP, 15.0).unwrap();

        assert_eq!(
            parsed.result,
            EvaluationResult {
                score: 12.0,
                max_score: 15.0,
                strengths: vec!["clear structure".to_string()],
                weaknesses: vec![],
                improvements: vec!["add examples".to_string()],
            }
        );
        assert!(parsed.deviations.is_empty());
        assert_eq!(serde_json::to_string(&parsed.result).unwrap(), ROUND_TRIP);
    }

    #[test]
    fn test_prose_wrapped_json_rejected() {
        let raw = format!("Here is your evaluation: {}", ROUND_TRIP);
        let result = parse_evaluation(&raw, 15.0);
        assert!(matches!(result, Err(ResponseError::NotJson(_))));
    }

    #[test]
    fn test_markdown_fenced_json_rejected() {
        let raw = format!("```json\n{}\n```", ROUND_TRIP);
        assert!(matches!(
            parse_evaluation(&raw, 15.0),
            Err(ResponseError::NotJson(_))
        ));
    }

    #[test]
    fn test_surrounding_whitespace_accepted() {
        let raw = format!("\n  {}\n", ROUND_TRIP);
        assert!(parse_evaluation(&raw, 15.0).is_ok());
    }

    #[test]
    fn test_missing_feedback_defaults_to_empty() {
        let parsed = parse_evaluation(r#"{"score":4,"max_score":10,"weaknesses":null}"#, 10.0)
            .unwrap();
        assert!(parsed.result.strengths.is_empty());
        assert!(parsed.result.weaknesses.is_empty());
        assert!(parsed.result.improvements.is_empty());
    }

    #[test]
    fn test_missing_score_is_fatal() {
        let result = parse_evaluation(r#"{"max_score":15,"strengths":["ok"]}"#, 15.0);
        assert!(matches!(result, Err(ResponseError::SchemaViolation(_))));
    }

    #[test]
    fn test_non_numeric_max_score_is_fatal() {
        let result = parse_evaluation(r#"{"score":5,"max_score":"15"}"#, 15.0);
        assert!(matches!(result, Err(ResponseError::SchemaViolation(_))));
    }

    #[test]
    fn test_wrong_feedback_type_is_fatal() {
        let result = parse_evaluation(r#"{"score":5,"max_score":15,"strengths":"good"}"#, 15.0);
        assert!(matches!(result, Err(ResponseError::SchemaViolation(_))));
    }

    #[test]
    fn test_non_positive_max_score_rejected() {
        let result = parse_evaluation(r#"{"score":0,"max_score":0}"#, 15.0);
        assert_eq!(result, Err(ResponseError::NonPositiveMaxScore(0.0)));
    }

    #[test]
    fn test_score_above_max_clamped() {
        let parsed = parse_evaluation(r#"{"score":17,"max_score":15}"#, 15.0).unwrap();
        assert_eq!(parsed.result.score, 15.0);
        assert_eq!(
            parsed.deviations,
            vec![ContractDeviation::ScoreClamped {
                original: 17.0,
                clamped: 15.0
            }]
        );
    }

    #[test]
    fn test_negative_score_clamped_to_zero() {
        let parsed = parse_evaluation(r#"{"score":-3,"max_score":15}"#, 15.0).unwrap();
        assert_eq!(parsed.result.score, 0.0);
    }

    #[test]
    fn test_max_score_mismatch_prefers_oracle_value() {
        let parsed = parse_evaluation(r#"{"score":8,"max_score":10}"#, 15.0).unwrap();
        assert_eq!(parsed.result.max_score, 10.0);
        assert_eq!(
            parsed.deviations,
            vec![ContractDeviation::MaxScoreMismatch {
                expected: 15.0,
                actual: 10.0
            }]
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let parsed =
            parse_evaluation(r#"{"score":8,"max_score":15,"verdict":"pass"}"#, 15.0).unwrap();
        assert_eq!(parsed.result.score, 8.0);
    }

    #[test]
    fn test_full_precision_marks_preserved() {
        let max = 11.746622920721741;
        let raw = serde_json::json!({ "score": max + 0.001, "max_score": max }).to_string();
        let parsed = parse_evaluation(&raw, max).unwrap();
        assert_eq!(parsed.result.max_score, max);
        assert_eq!(parsed.result.score, max);
    }

    proptest! {
        #[test]
        fn prop_score_always_within_bounds(score in -1.0e6f64..1.0e6, max in 0.5f64..1000.0) {
            let raw = serde_json::json!({ "score": score, "max_score": max }).to_string();
            let parsed = parse_evaluation(&raw, max).unwrap();
            prop_assert!(parsed.result.score >= 0.0);
            prop_assert!(parsed.result.score <= parsed.result.max_score);
        }

        #[test]
        fn prop_non_positive_scores_clamp_to_zero(score in -1.0e6f64..=0.0, max in 1.0f64..100.0) {
            let raw = serde_json::json!({ "score": score, "max_score": max }).to_string();
            prop_assert_eq!(parse_evaluation(&raw, max).unwrap().result.score, 0.0);
        }

        #[test]
        fn prop_scores_above_max_clamp_to_max(excess in 0.001f64..1.0e6, max in 1.0f64..100.0) {
            let raw = serde_json::json!({ "score": max + excess, "max_score": max }).to_string();
            prop_assert_eq!(parse_evaluation(&raw, max).unwrap().result.score, max);
        }

        #[test]
        fn prop_parsing_is_deterministic(raw in ".{0,64}", max in 1.0f64..100.0) {
            prop_assert_eq!(parse_evaluation(&raw, max), parse_evaluation(&raw, max));
        }
    }
}

//! Core types for answer evaluation.

use serde::{Deserialize, Serialize, Serializer};

/// Marks awarded when the caller does not specify `maxMarks`.
pub const DEFAULT_MAX_MARKS: f64 = 15.0;

/// A validated evaluation request.
///
/// Only [`crate::validate_request`] constructs these from untrusted input, so
/// holding one means the question and answer are non-blank and `max_marks`
/// is finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The exam question, verbatim
    pub question: String,

    /// The candidate's answer, verbatim
    pub answer: String,

    /// Maximum marks available for this question
    #[serde(rename = "maxMarks", serialize_with = "serialize_marks")]
    pub max_marks: f64,
}

impl EvaluationRequest {
    /// Build a request directly. Callers are responsible for upholding the
    /// invariants; use [`crate::validate_request`] for client payloads.
    pub fn new(question: impl Into<String>, answer: impl Into<String>, max_marks: f64) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            max_marks,
        }
    }
}

/// The structured evaluation returned to the caller.
///
/// `score` is always within `[0, max_score]` and the feedback lists are
/// always present, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(serialize_with = "serialize_marks")]
    pub score: f64,

    #[serde(serialize_with = "serialize_marks")]
    pub max_score: f64,

    pub strengths: Vec<String>,

    pub weaknesses: Vec<String>,

    pub improvements: Vec<String>,
}

/// Non-fatal irregularities found while enforcing the response contract.
///
/// These are corrected rather than rejected and reported for logging only.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractDeviation {
    /// The oracle reported a different maximum than was requested.
    /// The oracle's value is kept.
    MaxScoreMismatch { expected: f64, actual: f64 },

    /// The oracle's score fell outside `[0, max_score]` and was clamped.
    ScoreClamped { original: f64, clamped: f64 },
}

impl std::fmt::Display for ContractDeviation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractDeviation::MaxScoreMismatch { expected, actual } => write!(
                f,
                "max_score mismatch: requested {}, oracle reported {}",
                format_marks(*expected),
                format_marks(*actual)
            ),
            ContractDeviation::ScoreClamped { original, clamped } => write!(
                f,
                "score {} clamped to {}",
                format_marks(*original),
                format_marks(*clamped)
            ),
        }
    }
}

/// Render a mark value the way a person would write it: `15`, `7.5`.
pub fn format_marks(value: f64) -> String {
    match as_whole(value) {
        Some(whole) => whole.to_string(),
        None => value.to_string(),
    }
}

/// Serialize whole marks as JSON integers so `12` round-trips as `12`, not `12.0`.
fn serialize_marks<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_whole(*value) {
        Some(whole) => serializer.serialize_i64(whole),
        None => serializer.serialize_f64(*value),
    }
}

fn as_whole(value: f64) -> Option<i64> {
    // 2^53: beyond this an f64 no longer represents every integer exactly
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_marks() {
        assert_eq!(format_marks(15.0), "15");
        assert_eq!(format_marks(7.5), "7.5");
        assert_eq!(format_marks(0.0), "0");
    }

    #[test]
    fn test_result_serializes_whole_marks_as_integers() {
        let result = EvaluationResult {
            score: 12.0,
            max_score: 15.0,
            strengths: vec!["clear structure".to_string()],
            weaknesses: vec![],
            improvements: vec![],
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"score":12,"max_score":15,"strengths":["clear structure"],"weaknesses":[],"improvements":[]}"#
        );
    }

    #[test]
    fn test_result_serializes_fractional_score() {
        let result = EvaluationResult {
            score: 7.5,
            max_score: 10.0,
            strengths: vec![],
            weaknesses: vec![],
            improvements: vec![],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["score"], 7.5);
        assert_eq!(value["max_score"], 10);
    }

    #[test]
    fn test_deviation_display() {
        let deviation = ContractDeviation::ScoreClamped {
            original: 17.0,
            clamped: 15.0,
        };
        assert_eq!(deviation.to_string(), "score 17 clamped to 15");
    }
}

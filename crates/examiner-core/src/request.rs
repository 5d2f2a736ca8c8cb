//! Validation of inbound evaluation payloads.
//!
//! Rules are applied in a fixed order so the same payload always yields the
//! same request or the same error message.

use serde_json::Value as JsonValue;

use crate::types::{EvaluationRequest, DEFAULT_MAX_MARKS};
use crate::EvaluationError;

/// Message returned when the question or answer is unusable.
pub const MISSING_TEXT_MESSAGE: &str = "question and answer are required";

/// Message returned when `maxMarks` is present but unusable.
pub const INVALID_MAX_MARKS_MESSAGE: &str = "maxMarks must be a positive number";

/// Validate an arbitrary JSON payload into an [`EvaluationRequest`].
///
/// # Rules
/// 1. `question` and `answer` must be strings that are non-empty after trimming
/// 2. `maxMarks`, when present and not `null`, must be a finite positive number
/// 3. A missing `maxMarks` defaults to [`DEFAULT_MAX_MARKS`]
///
/// The question and answer are stored verbatim; trimming only decides emptiness.
pub fn validate_request(payload: &JsonValue) -> Result<EvaluationRequest, EvaluationError> {
    let question = required_text(payload, "question");
    let answer = required_text(payload, "answer");

    let (Some(question), Some(answer)) = (question, answer) else {
        return Err(EvaluationError::InvalidInput(MISSING_TEXT_MESSAGE.to_string()));
    };

    let max_marks = match payload.get("maxMarks") {
        None | Some(JsonValue::Null) => DEFAULT_MAX_MARKS,
        Some(value) => value
            .as_f64()
            .filter(|marks| marks.is_finite() && *marks > 0.0)
            .ok_or_else(|| EvaluationError::InvalidInput(INVALID_MAX_MARKS_MESSAGE.to_string()))?,
    };

    Ok(EvaluationRequest::new(question, answer, max_marks))
}

fn required_text<'a>(payload: &'a JsonValue, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(JsonValue::as_str)
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_message(payload: JsonValue) -> String {
        match validate_request(&payload) {
            Err(EvaluationError::InvalidInput(msg)) => msg,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_with_max_marks() {
        let request = validate_request(&json!({
            "question": "Explain separation of powers.",
            "answer": "Legislature, executive and judiciary...",
            "maxMarks": 10
        }))
        .unwrap();

        assert_eq!(request.question, "Explain separation of powers.");
        assert_eq!(request.max_marks, 10.0);
    }

    #[test]
    fn test_max_marks_defaults_to_fifteen() {
        let request = validate_request(&json!({
            "question": "Q",
            "answer": "A"
        }))
        .unwrap();
        assert_eq!(request.max_marks, DEFAULT_MAX_MARKS);

        let request = validate_request(&json!({
            "question": "Q",
            "answer": "A",
            "maxMarks": null
        }))
        .unwrap();
        assert_eq!(request.max_marks, 15.0);
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let request = validate_request(&json!({
            "question": "  What is federalism?\n",
            "answer": "A division of power."
        }))
        .unwrap();
        assert_eq!(request.question, "  What is federalism?\n");
    }

    #[test]
    fn test_empty_answer_rejected() {
        let msg = invalid_message(json!({
            "question": "Explain separation of powers.",
            "answer": "",
            "maxMarks": 10
        }));
        assert_eq!(msg, MISSING_TEXT_MESSAGE);
    }

    #[test]
    fn test_whitespace_only_question_rejected() {
        let msg = invalid_message(json!({ "question": "   \t", "answer": "Something" }));
        assert_eq!(msg, MISSING_TEXT_MESSAGE);
    }

    #[test]
    fn test_missing_and_non_text_fields_rejected() {
        assert_eq!(invalid_message(json!({ "answer": "A" })), MISSING_TEXT_MESSAGE);
        assert_eq!(
            invalid_message(json!({ "question": 42, "answer": "A" })),
            MISSING_TEXT_MESSAGE
        );
        assert_eq!(
            invalid_message(json!({ "question": "Q", "answer": ["A"] })),
            MISSING_TEXT_MESSAGE
        );
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert_eq!(invalid_message(json!("just a string")), MISSING_TEXT_MESSAGE);
        assert_eq!(invalid_message(JsonValue::Null), MISSING_TEXT_MESSAGE);
    }

    #[test]
    fn test_text_checked_before_max_marks() {
        let msg = invalid_message(json!({ "question": "", "answer": "A", "maxMarks": -1 }));
        assert_eq!(msg, MISSING_TEXT_MESSAGE);
    }

    #[test]
    fn test_invalid_max_marks_rejected() {
        for bad in [json!(0), json!(-5), json!("10"), json!(true), json!([15])] {
            let msg = invalid_message(json!({ "question": "Q", "answer": "A", "maxMarks": bad }));
            assert_eq!(msg, INVALID_MAX_MARKS_MESSAGE);
        }
    }

    #[test]
    fn test_fractional_max_marks_accepted() {
        let request =
            validate_request(&json!({ "question": "Q", "answer": "A", "maxMarks": 7.5 })).unwrap();
        assert_eq!(request.max_marks, 7.5);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let payload = json!({ "question": "Q", "answer": "A", "maxMarks": 20 });
        assert_eq!(
            validate_request(&payload).unwrap(),
            validate_request(&payload).unwrap()
        );
    }
}

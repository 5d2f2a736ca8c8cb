//! Prompts for the scoring oracle.
//!
//! The persona is fixed in the system role. Everything case-specific goes in
//! the user role, so per-request content cannot redefine the examiner.

use examiner_core::{format_marks, EvaluationRequest};

use crate::providers::ChatMessage;

/// System prompt establishing the examiner persona.
pub const EXAMINER_SYSTEM_PROMPT: &str = "You are a strict but fair examiner. \
You evaluate written exam answers and respond with a single JSON object only. \
Never include prose, markdown or code fences outside the JSON.";

/// Output contract appended to every user prompt.
pub const OUTPUT_SCHEMA_INSTRUCTIONS: &str = r#"Return ONLY a JSON object with exactly these five fields and nothing else:
{
  "score": number,            // marks awarded, between 0 and max_score
  "max_score": number,        // the maximum marks stated above
  "strengths": string[],      // what the answer does well
  "weaknesses": string[],     // gaps, errors or omissions
  "improvements": string[]    // concrete suggestions to score higher
}
Do not write any text before or after the JSON object."#;

/// Render the user-role prompt for a request.
///
/// Deterministic: the same request always renders the same text.
pub fn render_evaluation_prompt(request: &EvaluationRequest) -> String {
    let max_marks = format_marks(request.max_marks);
    format!(
        "Evaluate the candidate's answer to the exam question below out of {max_marks} marks.\n\
         \n\
         Question:\n\
         {question}\n\
         \n\
         Answer:\n\
         {answer}\n\
         \n\
         Maximum marks: {max_marks}\n\
         \n\
         {schema}",
        max_marks = max_marks,
        question = request.question,
        answer = request.answer,
        schema = OUTPUT_SCHEMA_INSTRUCTIONS,
    )
}

/// Build the full message list sent to the oracle.
pub fn build_messages(request: &EvaluationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(EXAMINER_SYSTEM_PROMPT),
        ChatMessage::user(render_evaluation_prompt(request)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EvaluationRequest {
        EvaluationRequest::new(
            "Explain separation of powers.",
            "The legislature makes laws, the executive enforces them.",
            10.0,
        )
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = render_evaluation_prompt(&request());
        assert!(prompt.contains("Explain separation of powers."));
        assert!(prompt.contains("The legislature makes laws, the executive enforces them."));
        assert!(prompt.contains("Maximum marks: 10\n"));
        assert!(!prompt.contains("10.0"));
    }

    #[test]
    fn test_prompt_names_all_five_fields() {
        let prompt = render_evaluation_prompt(&request());
        for field in ["score", "max_score", "strengths", "weaknesses", "improvements"] {
            assert!(prompt.contains(&format!("\"{}\"", field)), "missing {}", field);
        }
        assert!(prompt.contains("Return ONLY a JSON object"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            render_evaluation_prompt(&request()),
            render_evaluation_prompt(&request())
        );
    }

    #[test]
    fn test_persona_in_system_role_only() {
        let messages = build_messages(&request());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("strict but fair examiner"));
        assert!(messages[0].content.contains("JSON"));
        assert_eq!(messages[1].role, "user");
        assert!(!messages[1].content.contains("strict but fair examiner"));
    }

    #[test]
    fn test_fractional_marks_rendered() {
        let request = EvaluationRequest::new("Q", "A", 7.5);
        assert!(render_evaluation_prompt(&request).contains("Maximum marks: 7.5"));
    }
}

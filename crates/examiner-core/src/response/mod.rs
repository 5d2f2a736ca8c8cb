//! Oracle response contract enforcement.
//!
//! Completions are untrusted text. This module decodes them, validates them
//! against the embedded JSON Schema and produces a well-typed result.

mod parser;
mod schema;

pub use parser::{clamp_score, parse_evaluation, ParsedEvaluation, ResponseError};
pub use schema::validate_evaluation_schema;

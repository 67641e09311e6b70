//! Assertion validators.
//!
//! Every validator is a total function over `(content, expected)`. Malformed
//! input (a bad regex, unparsable JSON, a schema that will not compile) is a
//! failed assertion with a reason, never an error.

mod grounding;
mod json_schema;
mod pattern;
mod text;

pub use grounding::{check_grounding, extract_citations, split_sentences, Citation, GroundingReport};
pub use json_schema::{extract_json, validate_json_schema};
pub use pattern::validate_regex;
pub use text::{validate_contains, validate_exact_match};

use serde_json::Value;

use crate::suite::{Assertion, AssertionKind};

/// Result of checking one assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failed, with a human-readable reason.
    Fail(String),
}

impl Verdict {
    pub fn fail(reason: impl Into<String>) -> Self {
        Verdict::Fail(reason.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(reason) => Some(reason),
        }
    }
}

/// Check one assertion against content.
pub fn validate_assertion(content: &str, assertion: &Assertion) -> Verdict {
    let expected = assertion.expected.as_ref().unwrap_or(&Value::Null);

    match &assertion.kind {
        AssertionKind::ExactMatch => validate_exact_match(content, expected),
        AssertionKind::Contains => validate_contains(content, expected),
        AssertionKind::Regex => validate_regex(content, expected),
        AssertionKind::JsonSchema => validate_json_schema(content, expected),
        AssertionKind::SemanticSimilarity | AssertionKind::LlmJudge => Verdict::fail(format!(
            "assertion type '{}' is not supported in fixtures mode",
            assertion.kind
        )),
        AssertionKind::Unknown(tag) => Verdict::fail(format!("unknown assertion type: {}", tag)),
    }
}

/// JSON type name used in "expected must be ..." reasons.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

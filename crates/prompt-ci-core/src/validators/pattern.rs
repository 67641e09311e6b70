//! `regex` assertions.

use regex::Regex;
use serde_json::Value;

use super::{value_kind, Verdict};

/// Content matches the expected pattern anywhere.
///
/// The pattern is compiled per call; a pattern that does not compile is a
/// failed assertion carrying the compiler's message.
pub fn validate_regex(content: &str, expected: &Value) -> Verdict {
    let Some(pattern) = expected.as_str() else {
        return Verdict::fail(format!(
            "expected must be a string pattern, got {}",
            value_kind(expected)
        ));
    };

    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            return Verdict::fail(format!("invalid regex pattern '{}': {}", pattern, e));
        }
    };

    if re.is_match(content) {
        Verdict::Pass
    } else {
        Verdict::fail(format!("content does not match pattern '{}'", pattern))
    }
}

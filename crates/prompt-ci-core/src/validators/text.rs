//! Plain-text assertions: `exact_match` and `contains`.

use serde_json::Value;

use super::{value_kind, Verdict};

/// Content equals expected after trimming surrounding whitespace from both.
pub fn validate_exact_match(content: &str, expected: &Value) -> Verdict {
    let Some(expected) = expected.as_str() else {
        return Verdict::fail(format!(
            "expected must be a string, got {}",
            value_kind(expected)
        ));
    };

    if content.trim() == expected.trim() {
        Verdict::Pass
    } else {
        Verdict::fail("content does not exactly match expected")
    }
}

/// Content contains expected as a case-sensitive substring.
pub fn validate_contains(content: &str, expected: &Value) -> Verdict {
    let Some(expected) = expected.as_str() else {
        return Verdict::fail(format!(
            "expected must be a string, got {}",
            value_kind(expected)
        ));
    };

    if content.contains(expected) {
        Verdict::Pass
    } else {
        Verdict::fail(format!(
            "content does not contain expected string '{}'",
            expected
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_match_trims_both_sides() {
        assert!(validate_exact_match("  foo ", &json!("foo")).is_pass());
        assert!(validate_exact_match("foo", &json!("\tfoo\n")).is_pass());
    }

    #[test]
    fn test_exact_match_is_strict_inside() {
        assert!(!validate_exact_match("foo bar", &json!("foo")).is_pass());
        assert!(!validate_exact_match("Foo", &json!("foo")).is_pass());
        assert!(!validate_exact_match("foo  bar", &json!("foo bar")).is_pass());
    }

    #[test]
    fn test_contains() {
        assert!(validate_contains("hello world", &json!("world")).is_pass());
        assert!(validate_contains("anything", &json!("")).is_pass());
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        assert_eq!(
            validate_contains("hello", &json!("World")),
            Verdict::fail("content does not contain expected string 'World'")
        );
    }

    #[test]
    fn test_non_string_expected() {
        assert_eq!(
            validate_contains("42", &json!(42)),
            Verdict::fail("expected must be a string, got number")
        );
        assert_eq!(
            validate_exact_match("x", &json!({"a": 1})),
            Verdict::fail("expected must be a string, got object")
        );
    }
}

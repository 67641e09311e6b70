//! `json_schema` assertions.
//!
//! Model output often wraps JSON in prose or code fences, so the first
//! balanced object (or, failing that, array) is extracted before parsing.

use serde_json::Value;

use super::Verdict;

/// Find the first balanced `{...}` span, else the first balanced `[...]`
/// span, else return the trimmed content unchanged.
///
/// Brackets inside string literals are not special-cased.
pub fn extract_json(content: &str) -> &str {
    let content = content.trim();

    balanced_span(content, b'{', b'}')
        .or_else(|| balanced_span(content, b'[', b']'))
        .unwrap_or(content)
}

fn balanced_span(content: &str, open: u8, close: u8) -> Option<&str> {
    let start = content.bytes().position(|b| b == open)?;
    let mut depth = 0usize;

    for (offset, byte) in content.as_bytes()[start..].iter().enumerate() {
        if *byte == open {
            depth += 1;
        } else if *byte == close {
            depth -= 1;
            if depth == 0 {
                return Some(&content[start..=start + offset]);
            }
        }
    }

    None
}

/// Content contains JSON that validates against `schema`.
pub fn validate_json_schema(content: &str, schema: &Value) -> Verdict {
    let candidate = extract_json(content);
    if candidate.is_empty() {
        return Verdict::fail("no valid JSON found in content");
    }

    let instance: Value = match serde_json::from_str(candidate) {
        Ok(v) => v,
        Err(e) => return Verdict::fail(format!("content is not valid JSON: {}", e)),
    };

    let validator = match jsonschema::options().build(schema) {
        Ok(v) => v,
        Err(e) => return Verdict::fail(format!("failed to compile schema: {}", e)),
    };

    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Verdict::Pass
    } else {
        Verdict::fail(format!(
            "JSON schema validation failed: {}",
            errors.join("; ")
        ))
    }
}

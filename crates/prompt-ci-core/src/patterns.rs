//! Fixed patterns shared by the suite validator and the grounding checker.
//!
//! The citation grammar is fixed to `[doc:<doc-id>#c<n>]`.
//! `grounding.citation_pattern` in a suite does not affect extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Case identifiers: lowercase ASCII letters, digits and underscores, 1-32 long.
    pub static ref CASE_ID_PATTERN: Regex =
        Regex::new(r"^[a-z0-9_]{1,32}$").expect("case id pattern is valid");

    /// `[doc:<doc-id>#<chunk-id>]` where the chunk id is `c` plus a positive
    /// integer without leading zeros.
    pub static ref CITATION_PATTERN: Regex =
        Regex::new(r"\[doc:([a-z0-9_-]+)#(c[1-9][0-9]*)\]").expect("citation pattern is valid");

    /// Sentence terminator followed by ASCII whitespace.
    pub static ref SENTENCE_BREAK: Regex =
        Regex::new(r"[.!?][\t\n\x0C\r ]+").expect("sentence break pattern is valid");
}

/// Check if a case identifier is well formed.
pub fn is_valid_case_id(id: &str) -> bool {
    CASE_ID_PATTERN.is_match(id)
}

/// Check if text contains at least one citation.
pub fn contains_citation(text: &str) -> bool {
    CITATION_PATTERN.is_match(text)
}

/// Remove every citation from text.
pub fn strip_citations(text: &str) -> String {
    CITATION_PATTERN.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_pattern() {
        assert!(is_valid_case_id("grounding_001"));
        assert!(is_valid_case_id("a"));
        assert!(is_valid_case_id(&"x".repeat(32)));
        assert!(!is_valid_case_id(&"x".repeat(33)));
        assert!(!is_valid_case_id(""));
        assert!(!is_valid_case_id("Grounding_1"));
        assert!(!is_valid_case_id("case-1"));
        assert!(!is_valid_case_id("case_1\n"));
    }

    #[test]
    fn test_citation_grammar() {
        assert!(contains_citation("see [doc:policy#c1]"));
        assert!(contains_citation("[doc:refund-policy_v2#c12]"));
        assert!(!contains_citation("[doc:policy#c0]"));
        assert!(!contains_citation("[doc:policy#c01]"));
        assert!(!contains_citation("[doc:Policy#c1]"));
        assert!(!contains_citation("[doc:policy#1]"));
        assert!(!contains_citation("doc:policy#c1"));
    }

    #[test]
    fn test_strip_citations() {
        assert_eq!(strip_citations("[doc:a#c1] [doc:b#c2]."), " .");
        assert_eq!(strip_citations("no citations"), "no citations");
    }

    #[test]
    fn test_sentence_break_requires_whitespace() {
        assert!(SENTENCE_BREAK.is_match("One. Two"));
        assert!(SENTENCE_BREAK.is_match("Done!\nNext"));
        assert!(!SENTENCE_BREAK.is_match("3.14 is pi"));
    }
}

//! Grounding check: citation integrity and citation density.
//!
//! Free-text answers must cite the suite's reference documents. Two kinds of
//! problem are reported, all of them, in order:
//!
//! 1. a citation whose doc or chunk does not exist in the suite;
//! 2. a sentence of six or more tokens that carries no citation.
//!
//! Sentence segmentation is a plain split on `.`, `!` or `?` followed by
//! whitespace. Abbreviations, decimals and quoted punctuation are not
//! handled. Citation-only sentences and heading-like sentences are exempt
//! from the density rule.

use tracing::debug;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::patterns::{contains_citation, strip_citations, CITATION_PATTERN, SENTENCE_BREAK};
use crate::suite::Suite;

/// Sentences with at least this many tokens need a citation.
pub const MIN_TOKENS_REQUIRING_CITATION: usize = 6;

/// Heading-like sentences are shorter than this many bytes.
const HEADING_MAX_LEN: usize = 50;

/// Characters of an offending sentence quoted in a failure reason.
const PREVIEW_CHARS: usize = 50;

/// A citation found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub doc_id: String,
    pub chunk_id: String,
    /// The full matched text, e.g. `[doc:policy#c2]`
    pub full: String,
}

/// Outcome of a grounding check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundingReport {
    /// Every citation found, in order of appearance
    pub citations: Vec<Citation>,

    /// Independent failure reasons; empty when the content is grounded
    pub failures: Vec<String>,
}

impl GroundingReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extract every well-formed citation from content.
pub fn extract_citations(content: &str) -> Vec<Citation> {
    CITATION_PATTERN
        .captures_iter(content)
        .map(|caps| Citation {
            doc_id: caps[1].to_string(),
            chunk_id: caps[2].to_string(),
            full: caps[0].to_string(),
        })
        .collect()
}

/// Split content into trimmed, non-empty sentences.
pub fn split_sentences(content: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Check citation integrity and density of `content` against `suite`.
pub fn check_grounding(content: &str, suite: &Suite) -> GroundingReport {
    if !suite.grounding.citation_pattern.is_empty() {
        debug!(
            configured = %suite.grounding.citation_pattern,
            "citation_pattern is informational; using the built-in citation grammar"
        );
    }

    let index = suite.doc_index();
    let citations = extract_citations(content);
    let mut failures = Vec::new();

    for citation in &citations {
        match index.get(citation.doc_id.as_str()) {
            None => failures.push(format!(
                "citation {} references non-existent doc '{}'",
                citation.full, citation.doc_id
            )),
            Some(chunks) if !chunks.contains(citation.chunk_id.as_str()) => {
                failures.push(format!(
                    "citation {} references non-existent chunk '{}'",
                    citation.full, citation.chunk_id
                ))
            }
            Some(_) => {}
        }
    }

    for sentence in split_sentences(content) {
        if is_citation_only(sentence) || looks_like_heading(sentence) {
            continue;
        }

        let tokens = sentence.split_whitespace().count();
        if tokens >= MIN_TOKENS_REQUIRING_CITATION && !contains_citation(sentence) {
            failures.push(format!(
                "sentence with {} tokens lacks citation: '{}'",
                tokens,
                preview(sentence)
            ));
        }
    }

    GroundingReport {
        citations,
        failures,
    }
}

/// Nothing but punctuation and whitespace remains once citations are removed.
fn is_citation_only(sentence: &str) -> bool {
    strip_citations(sentence)
        .trim()
        .chars()
        .all(|c| is_punctuation(c) || c.is_whitespace())
}

/// Markdown heading, or a short all-caps line without a period.
fn looks_like_heading(sentence: &str) -> bool {
    let s = sentence.trim();
    if s.starts_with('#') {
        return true;
    }
    s.len() < HEADING_MAX_LEN && s.to_uppercase() == s && !s.contains('.')
}

/// Unicode general category P. Symbols such as `$`, `+` and `|` are
/// category S and do not count.
fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

fn preview(sentence: &str) -> String {
    match sentence.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &sentence[..cut]),
        None => sentence.to_string(),
    }
}

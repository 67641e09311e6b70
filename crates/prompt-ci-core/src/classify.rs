//! Case classification.
//!
//! A case's category is derived from the prefix of its identifier, checked
//! in priority order: `grounding`, then `schema`, then `tool`. Anything else
//! falls back to grounding, so classification always succeeds.
//!
//! The category decides where the fixture lives, which extension it uses and
//! whether the grounding checker runs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of an eval case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// Free-text answers checked for citations.
    #[default]
    Grounding,
    /// Structured output checked against a JSON schema.
    Schema,
    /// Tool-call output.
    Tool,
}

impl CaseKind {
    /// Classify a case identifier by prefix.
    pub fn classify(case_id: &str) -> Self {
        if case_id.starts_with("grounding") {
            CaseKind::Grounding
        } else if case_id.starts_with("schema") {
            CaseKind::Schema
        } else if case_id.starts_with("tool") {
            CaseKind::Tool
        } else {
            CaseKind::Grounding
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::Grounding => "grounding",
            CaseKind::Schema => "schema",
            CaseKind::Tool => "tool",
        }
    }

    /// Subdirectory of the fixtures root holding this kind's fixtures.
    pub fn fixture_subdir(&self) -> &'static str {
        self.as_str()
    }

    /// Fixture file extension for a case of this kind.
    ///
    /// Tool cases ending in `_secret` or `_behavior` capture prose rather
    /// than a tool call, so they use the text extension.
    pub fn fixture_extension(&self, case_id: &str) -> &'static str {
        match self {
            CaseKind::Grounding => ".out.txt",
            CaseKind::Schema => ".out.json",
            CaseKind::Tool if case_id.ends_with("_secret") || case_id.ends_with("_behavior") => {
                ".out.txt"
            }
            CaseKind::Tool => ".out.json",
        }
    }

    /// Validator name shown in reports.
    pub fn validator_label(&self) -> &'static str {
        match self {
            CaseKind::Grounding => "grounding",
            CaseKind::Schema => "json_schema",
            CaseKind::Tool => "tool",
        }
    }

    /// Whether the citation checker runs for this kind.
    pub fn requires_grounding(&self) -> bool {
        matches!(self, CaseKind::Grounding)
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

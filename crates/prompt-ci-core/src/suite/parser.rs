//! Suite model and parsing from YAML.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::classify::CaseKind;

/// Errors that can occur when loading a suite.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("failed to read suite file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Lookup of doc id to its chunk ids.
pub type DocIndex<'a> = HashMap<&'a str, HashSet<&'a str>>;

/// A chunk of a reference document, cited as `doc_id#chunk_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub text: String,
}

/// A reference document that grounded answers may cite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doc {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

/// A tool definition the model under test may call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<Value>,
}

/// Grounding configuration.
///
/// `citation_pattern` is informational; extraction always uses
/// [`crate::patterns::CITATION_PATTERN`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GroundingConfig {
    #[serde(default)]
    pub citation_format: String,

    #[serde(default)]
    pub valid_doc_ids: Vec<String>,

    #[serde(default)]
    pub valid_chunk_ids: Vec<String>,

    #[serde(default)]
    pub citation_pattern: String,
}

impl GroundingConfig {
    /// Whether the suite declares a grounding section at all.
    pub fn is_declared(&self) -> bool {
        !self.citation_format.is_empty()
    }
}

/// Assertion type tag.
///
/// Unrecognised tags deserialize to `Unknown` so that newer suite files still
/// load; the suite validator rejects them and evaluation fails them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssertionKind {
    ExactMatch,
    Contains,
    Regex,
    JsonSchema,
    SemanticSimilarity,
    LlmJudge,
    Unknown(String),
}

impl AssertionKind {
    pub fn as_str(&self) -> &str {
        match self {
            AssertionKind::ExactMatch => "exact_match",
            AssertionKind::Contains => "contains",
            AssertionKind::Regex => "regex",
            AssertionKind::JsonSchema => "json_schema",
            AssertionKind::SemanticSimilarity => "semantic_similarity",
            AssertionKind::LlmJudge => "llm_judge",
            AssertionKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AssertionKind::Unknown(_))
    }
}

impl Default for AssertionKind {
    fn default() -> Self {
        AssertionKind::Unknown(String::new())
    }
}

impl From<String> for AssertionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "exact_match" => AssertionKind::ExactMatch,
            "contains" => AssertionKind::Contains,
            "regex" => AssertionKind::Regex,
            "json_schema" => AssertionKind::JsonSchema,
            "semantic_similarity" => AssertionKind::SemanticSimilarity,
            "llm_judge" => AssertionKind::LlmJudge,
            _ => AssertionKind::Unknown(tag),
        }
    }
}

impl From<&str> for AssertionKind {
    fn from(tag: &str) -> Self {
        AssertionKind::from(tag.to_string())
    }
}

impl From<AssertionKind> for String {
    fn from(kind: AssertionKind) -> Self {
        match kind {
            AssertionKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single expectation about a case's output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assertion {
    #[serde(rename = "type", default)]
    pub kind: AssertionKind,

    /// Text for `exact_match`/`contains`/`regex`, a schema for `json_schema`.
    /// `None` when absent or null.
    #[serde(default)]
    pub expected: Option<Value>,

    /// Informational only; scoring does not use it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Assertion {
    pub fn new(kind: impl Into<AssertionKind>, expected: Value) -> Self {
        Self {
            kind: kind.into(),
            expected: Some(expected),
            weight: None,
        }
    }
}

/// An eval case.
///
/// `kind` is derived from `id` whenever a case is deserialized or built
/// with [`Case::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawCase")]
pub struct Case {
    pub id: String,

    /// Prompt shown to the model; not evaluated.
    pub prompt: String,

    pub assertions: Vec<Assertion>,

    #[serde(skip)]
    pub kind: CaseKind,
}

impl Case {
    pub fn new(id: impl Into<String>, assertions: Vec<Assertion>) -> Self {
        let id = id.into();
        Self {
            kind: CaseKind::classify(&id),
            id,
            prompt: String::new(),
            assertions,
        }
    }
}

/// Case as written in suite YAML, before classification.
#[derive(Deserialize)]
struct RawCase {
    #[serde(default)]
    id: String,

    #[serde(default)]
    prompt: String,

    #[serde(default)]
    assertions: Vec<Assertion>,
}

impl From<RawCase> for Case {
    fn from(raw: RawCase) -> Self {
        Self {
            kind: CaseKind::classify(&raw.id),
            id: raw.id,
            prompt: raw.prompt,
            assertions: raw.assertions,
        }
    }
}

/// An eval suite.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Suite {
    #[serde(rename = "suite_name", default)]
    pub name: String,

    /// Capability under test (e.g. "rag", "tool_use")
    #[serde(default)]
    pub capability: String,

    #[serde(default)]
    pub docs: Vec<Doc>,

    #[serde(default)]
    pub schemas: BTreeMap<String, Value>,

    #[serde(default)]
    pub tools: Vec<Tool>,

    #[serde(default)]
    pub grounding: GroundingConfig,

    #[serde(default)]
    pub cases: Vec<Case>,
}

impl Suite {
    /// Parse a suite from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SuiteError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a suite from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Build a doc id -> chunk ids lookup.
    pub fn doc_index(&self) -> DocIndex<'_> {
        self.docs
            .iter()
            .map(|doc| {
                let chunks = doc.chunks.iter().map(|c| c.id.as_str()).collect();
                (doc.id.as_str(), chunks)
            })
            .collect()
    }

    pub fn schema_names(&self) -> HashSet<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn tool_names(&self) -> HashSet<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn case(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE: &str = r#"
suite_name: "Refund assistant"
capability: rag
docs:
  - id: refund_policy
    title: "Refund Policy"
    chunks:
      - id: c1
        text: "Refunds are issued within 14 days."
      - id: c2
        text: "Digital goods are not refundable."
schemas:
  order:
    type: object
    additionalProperties: false
tools:
  - name: lookup_order
    description: "Fetch an order by id"
    args:
      order_id: string
grounding:
  citation_format: "[doc:<id>#<chunk>]"
  valid_doc_ids: [refund_policy]
  valid_chunk_ids: [c1, c2]
  citation_pattern: '\[doc:[a-z_]+#c\d+\]'
cases:
  - id: grounding_refund_window
    prompt: "How long do refunds take?"
    assertions:
      - type: contains
        expected: "14 days"
        weight: 1.0
  - id: schema_order
    assertions:
      - type: json_schema
        expected:
          type: object
          additionalProperties: false
  - id: tool_lookup
    assertions:
      - type: fuzzy_match
        expected: "x"
"#;

    #[test]
    fn test_parse_suite() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        assert_eq!(suite.name, "Refund assistant");
        assert_eq!(suite.capability, "rag");
        assert_eq!(suite.docs.len(), 1);
        assert_eq!(suite.docs[0].chunks.len(), 2);
        assert_eq!(suite.cases.len(), 3);
        assert_eq!(suite.grounding.valid_doc_ids, vec!["refund_policy"]);
        assert!(suite.grounding.is_declared());
        assert_eq!(suite.cases[0].assertions[0].weight, Some(1.0));
    }

    #[test]
    fn test_cases_are_classified_on_load() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        assert_eq!(suite.cases[0].kind, CaseKind::Grounding);
        assert_eq!(suite.cases[1].kind, CaseKind::Schema);
        assert_eq!(suite.cases[2].kind, CaseKind::Tool);
    }

    #[test]
    fn test_direct_deserialization_classifies_cases() {
        let suite: Suite = serde_yaml::from_str(SUITE).unwrap();
        let kinds: Vec<CaseKind> = suite.cases.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CaseKind::Grounding, CaseKind::Schema, CaseKind::Tool]);

        let case: Case = serde_json::from_str(r#"{"id": "tool_refund", "assertions": []}"#).unwrap();
        assert_eq!(case.kind, CaseKind::Tool);
    }

    #[test]
    fn test_kind_is_not_serialized() {
        let value = serde_json::to_value(Case::new("schema_x", vec![])).unwrap();
        assert!(value.get("kind").is_none());
        assert_eq!(value["id"], "schema_x");
    }

    #[test]
    fn test_assertion_kinds() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        assert_eq!(suite.cases[0].assertions[0].kind, AssertionKind::Contains);
        assert_eq!(suite.cases[1].assertions[0].kind, AssertionKind::JsonSchema);
        assert_eq!(
            suite.cases[2].assertions[0].kind,
            AssertionKind::Unknown("fuzzy_match".to_string())
        );
        assert!(!suite.cases[2].assertions[0].kind.is_known());
    }

    #[test]
    fn test_unknown_kind_round_trips_its_tag() {
        let kind = AssertionKind::from("fuzzy_match");
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"fuzzy_match\"");
        assert_eq!(serde_json::to_string(&AssertionKind::LlmJudge).unwrap(), "\"llm_judge\"");
    }

    #[test]
    fn test_missing_fields_default() {
        let suite = Suite::from_yaml("cases:\n  - prompt: hi\n    assertions:\n      - expected: x\n").unwrap();
        assert!(suite.name.is_empty());
        assert!(suite.cases[0].id.is_empty());
        assert_eq!(suite.cases[0].assertions[0].kind, AssertionKind::Unknown(String::new()));
        assert!(!suite.grounding.is_declared());
    }

    #[test]
    fn test_null_expected_is_none() {
        let suite = Suite::from_yaml(
            "suite_name: s\ncases:\n  - id: a\n    assertions:\n      - type: contains\n        expected: null\n",
        )
        .unwrap();
        assert!(suite.cases[0].assertions[0].expected.is_none());
    }

    #[test]
    fn test_doc_index() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        let index = suite.doc_index();
        let chunks = index.get("refund_policy").unwrap();
        assert!(chunks.contains("c1"));
        assert!(chunks.contains("c2"));
        assert!(!chunks.contains("c3"));
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_name_lookups() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        assert!(suite.schema_names().contains("order"));
        assert!(suite.tool_names().contains("lookup_order"));
        assert_eq!(suite.case("schema_order").unwrap().kind, CaseKind::Schema);
        assert!(suite.case("nope").is_none());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Suite::from_yaml("suite_name: [unterminated");
        assert!(matches!(result, Err(SuiteError::Yaml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Suite::from_yaml_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(SuiteError::Io(_))));
    }
}

//! Static suite validation.
//!
//! Runs once before execution and collects every problem instead of stopping
//! at the first. Errors keep discovery order. A repeated case id is reported
//! at each of its occurrences.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

use crate::fixture::FixtureLoader;
use crate::patterns::is_valid_case_id;

use super::{Assertion, AssertionKind, Suite};

/// All problems found in a suite.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("suite validation failed with {} errors:\n  - {}", .errors.len(), .errors.join("\n  - "))]
pub struct SuiteValidationError {
    pub errors: Vec<String>,
}

/// Validate a suite's structure and that every case has a fixture.
pub fn validate_suite<L>(suite: &Suite, fixtures: &L) -> Result<(), SuiteValidationError>
where
    L: FixtureLoader + ?Sized,
{
    let mut pass = ValidationPass::default();

    pass.check_header(suite);
    pass.check_cases(suite, fixtures);
    pass.check_docs(suite);
    pass.check_grounding(suite);
    pass.check_schema_strictness(suite);

    pass.finish()
}

/// Error accumulator for a single validation run.
#[derive(Default)]
struct ValidationPass {
    errors: Vec<String>,
}

impl ValidationPass {
    fn push(&mut self, error: String) {
        self.errors.push(error);
    }

    fn check_header(&mut self, suite: &Suite) {
        if suite.name.is_empty() {
            self.push("suite_name is required".to_string());
        }
        if suite.cases.is_empty() {
            self.push("cases array must contain at least one test case".to_string());
        }
    }

    fn check_cases<L>(&mut self, suite: &Suite, fixtures: &L)
    where
        L: FixtureLoader + ?Sized,
    {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for case in &suite.cases {
            *occurrences.entry(case.id.as_str()).or_default() += 1;
        }

        for (i, case) in suite.cases.iter().enumerate() {
            if !is_valid_case_id(&case.id) {
                self.push(format!(
                    "case[{}]: id '{}' does not match pattern ^[a-z0-9_]{{1,32}}$",
                    i, case.id
                ));
            }

            if occurrences[case.id.as_str()] > 1 {
                self.push(format!("case[{}]: duplicate case id '{}'", i, case.id));
            }

            if case.assertions.is_empty() {
                self.push(format!(
                    "case[{}] '{}': must have at least one assertion",
                    i, case.id
                ));
            }

            for (j, assertion) in case.assertions.iter().enumerate() {
                if let Some(problem) = assertion_problem(assertion) {
                    self.push(format!(
                        "case[{}] '{}' assertion[{}]: {}",
                        i, case.id, j, problem
                    ));
                }
            }

            match fixtures.check(case) {
                Ok(()) => {}
                Err(e) if e.is_not_found() => self.push(format!(
                    "case[{}] '{}': fixture file not found at {}",
                    i,
                    case.id,
                    e.path().display()
                )),
                Err(e) => debug!(case = %case.id, error = %e, "fixture present but not inspectable"),
            }
        }
    }

    fn check_docs(&mut self, suite: &Suite) {
        for doc in &suite.docs {
            let mut seen = HashSet::new();
            for chunk in &doc.chunks {
                if !seen.insert(chunk.id.as_str()) {
                    self.push(format!(
                        "doc '{}': duplicate chunk id '{}'",
                        doc.id, chunk.id
                    ));
                }
            }
        }
    }

    fn check_grounding(&mut self, suite: &Suite) {
        if !suite.grounding.is_declared() {
            return;
        }

        let index = suite.doc_index();
        for doc_id in &suite.grounding.valid_doc_ids {
            if !index.contains_key(doc_id.as_str()) {
                self.push(format!(
                    "grounding: valid_doc_ids references non-existent doc '{}'",
                    doc_id
                ));
            }
        }
    }

    /// Object schemas must opt out of extra properties explicitly.
    fn check_schema_strictness(&mut self, suite: &Suite) {
        for (i, case) in suite.cases.iter().enumerate() {
            for (j, assertion) in case.assertions.iter().enumerate() {
                if assertion.kind != AssertionKind::JsonSchema {
                    continue;
                }
                if let Some(schema) = &assertion.expected {
                    if !is_strict_object_schema(schema) {
                        self.push(format!(
                            "case[{}] '{}' assertion[{}]: json_schema must have additionalProperties: false",
                            i, case.id, j
                        ));
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<(), SuiteValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SuiteValidationError {
                errors: self.errors,
            })
        }
    }
}

/// First structural problem with an assertion, if any.
fn assertion_problem(assertion: &Assertion) -> Option<String> {
    if let AssertionKind::Unknown(tag) = &assertion.kind {
        return Some(format!("unknown type '{}'", tag));
    }
    if assertion.expected.is_none() {
        return Some("expected is required".to_string());
    }
    None
}

/// Non-object schemas and non-map values are exempt.
fn is_strict_object_schema(schema: &Value) -> bool {
    let Some(map) = schema.as_object() else {
        return true;
    };
    if map.get("type").and_then(Value::as_str) != Some("object") {
        return true;
    }
    map.get("additionalProperties") == Some(&Value::Bool(false))
}

//! Suite model, loading and static validation.
//!
//! Suites are YAML documents listing reference docs, schemas, tools and the
//! cases to evaluate. Parsing is lenient; [`validate_suite`] reports every
//! structural problem before anything runs.

mod parser;
mod validate;

pub use parser::{
    Assertion, AssertionKind, Case, Chunk, Doc, DocIndex, GroundingConfig, Suite, SuiteError, Tool,
};
pub use validate::{validate_suite, SuiteValidationError};

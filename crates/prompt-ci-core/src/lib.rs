//! # prompt-ci-core
//!
//! Deterministic evaluation engine for LLM eval suites.
//!
//! A suite declares cases, the assertions each case's output must satisfy,
//! and the reference documents grounded answers may cite. This crate checks
//! pre-recorded fixture output against those declarations:
//! - Is the suite itself well formed?
//! - Does each case's output satisfy its assertions?
//! - Are free-text answers cited, and do the citations resolve?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same suite and fixtures always give the same results
//! 2. **No model calls**: only pre-computed fixtures are evaluated
//! 3. **Total validators**: malformed input fails an assertion, never the run
//! 4. **Sequential**: cases run in declaration order, one at a time
//!
//! ## Example
//!
//! ```rust,ignore
//! use prompt_ci_core::{evaluate_suite, FixtureDir, Suite};
//!
//! let suite = Suite::from_yaml_file("suite.yaml")?;
//! let fixtures = FixtureDir::new("fixtures");
//! let outcome = evaluate_suite(&suite, &fixtures, false)?;
//!
//! for result in &outcome.results {
//!     println!("{} {}", result.id, result.status);
//! }
//! std::process::exit(outcome.exit_code().into());
//! ```

pub mod classify;
pub mod fixture;
pub mod patterns;
pub mod report;
pub mod runner;
pub mod suite;
pub mod types;
pub mod validators;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types at crate root
pub use classify::CaseKind;
pub use fixture::{fixture_path, FixtureDir, FixtureError, FixtureLoader};
pub use report::{write_reports, ReportError};
pub use runner::{RunOutcome, Runner};
pub use suite::{
    validate_suite, Assertion, AssertionKind, Case, Chunk, Doc, GroundingConfig, Suite,
    SuiteError, SuiteValidationError, Tool,
};
pub use types::{CaseResult, Metrics, Status, Summary};
pub use validators::{check_grounding, validate_assertion, Citation, GroundingReport, Verdict};

/// Validate a suite, then run every case against its fixture.
///
/// Nothing runs if validation finds any problem.
pub fn evaluate_suite<L>(
    suite: &Suite,
    fixtures: &L,
    fail_fast: bool,
) -> Result<RunOutcome, SuiteValidationError>
where
    L: FixtureLoader + ?Sized,
{
    validate_suite(suite, fixtures)?;
    Ok(Runner::new(suite, fixtures).fail_fast(fail_fast).run())
}

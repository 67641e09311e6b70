//! Runner: evaluates every case of a suite, in order, against its fixture.
//!
//! Per case:
//! 1. load the fixture; a load error ends the case with `ERROR`;
//! 2. evaluate every assertion, collecting all failures;
//! 3. for grounding cases, append the grounding check's failures;
//! 4. `PASS` iff nothing failed, else `FAIL`.
//!
//! Execution is sequential and synchronous. With fail-fast enabled the run
//! stops right after the first `FAIL` or `ERROR`.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, debug_span, info};

use crate::fixture::FixtureLoader;
use crate::suite::{Case, Suite};
use crate::types::{CaseResult, Status, Summary};
use crate::validators::{check_grounding, validate_assertion, Verdict};

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// One result per evaluated case, in suite order
    pub results: Vec<CaseResult>,

    /// Whether any result has status `ERROR`
    pub has_error: bool,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }

    /// Process exit code: 2 if any case errored, 1 if any failed, else 0.
    pub fn exit_code(&self) -> u8 {
        if self.has_error {
            2
        } else if self.results.iter().any(|r| r.status == Status::Fail) {
            1
        } else {
            0
        }
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::is_pass)
    }
}

/// Evaluates a suite's cases against fixtures.
pub struct Runner<'a, L: FixtureLoader + ?Sized> {
    suite: &'a Suite,
    fixtures: &'a L,
    fail_fast: bool,
}

impl<'a, L: FixtureLoader + ?Sized> Runner<'a, L> {
    pub fn new(suite: &'a Suite, fixtures: &'a L) -> Self {
        Self {
            suite,
            fixtures,
            fail_fast: false,
        }
    }

    /// Stop after the first `FAIL` or `ERROR`.
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Run all cases in declaration order.
    pub fn run(&self) -> RunOutcome {
        let started_at = Utc::now();
        let mut results = Vec::with_capacity(self.suite.cases.len());

        for case in &self.suite.cases {
            let result = self.run_case(case);
            let stop = self.fail_fast && result.status.is_failure();
            results.push(result);

            if stop {
                info!(case = %case.id, "fail-fast: stopping after first failure");
                break;
            }
        }

        let has_error = results.iter().any(|r| r.status == Status::Error);
        let outcome = RunOutcome {
            results,
            has_error,
            started_at,
            completed_at: Utc::now(),
        };

        let summary = outcome.summary();
        info!(
            suite = %self.suite.name,
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            total = summary.total,
            "suite run complete"
        );

        outcome
    }

    /// Evaluate a single case.
    pub fn run_case(&self, case: &Case) -> CaseResult {
        let span = debug_span!("case", id = %case.id, kind = %case.kind);
        let _enter = span.enter();
        let start = Instant::now();

        let content = match self.fixtures.load(case) {
            Ok(content) => content,
            Err(e) => {
                debug!(error = %e, "fixture load failed");
                return self.finish(case, start, Status::Error, vec![format!("fixture error: {}", e)]);
            }
        };

        let mut failures = Vec::new();

        for assertion in &case.assertions {
            if let Verdict::Fail(reason) = validate_assertion(&content, assertion) {
                failures.push(format!("[{}] {}", assertion.kind, reason));
            }
        }

        if case.kind.requires_grounding() {
            let report = check_grounding(&content, self.suite);
            debug!(citations = report.citations.len(), "grounding checked");
            failures.extend(
                report
                    .failures
                    .into_iter()
                    .map(|f| format!("[grounding] {}", f)),
            );
        }

        let status = if failures.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        };
        self.finish(case, start, status, failures)
    }

    fn finish(
        &self,
        case: &Case,
        start: Instant,
        status: Status,
        failure_reasons: Vec<String>,
    ) -> CaseResult {
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(%status, duration_ms, failures = failure_reasons.len(), "case finished");

        CaseResult {
            id: case.id.clone(),
            status,
            validator: case.kind.validator_label().to_string(),
            duration_ms,
            failure_reasons,
            metrics: None,
        }
    }
}

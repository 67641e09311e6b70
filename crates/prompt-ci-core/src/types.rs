//! Result types shared by the runner and the report writers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final status of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    /// The fixture could not be loaded; assertions were not evaluated.
    Error,
    Skip,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Error => "ERROR",
            Status::Skip => "SKIP",
        }
    }

    /// FAIL and ERROR both stop a fail-fast run.
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Fail | Status::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional performance metrics. Fixture runs never fill these in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
}

/// The outcome of evaluating one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case identifier
    pub id: String,

    pub status: Status,

    /// Validator name for reporting (see [`crate::CaseKind::validator_label`])
    pub validator: String,

    /// Wall-clock time spent on the case
    pub duration_ms: u64,

    /// Human-readable reasons, in the order they were found
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_reasons: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl CaseResult {
    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }
}

/// Status counts over a list of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        let mut summary = Summary {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.status {
                Status::Pass => summary.passed += 1,
                Status::Fail => summary.failed += 1,
                Status::Error => summary.errored += 1,
                Status::Skip => summary.skipped += 1,
            }
        }
        summary
    }
}

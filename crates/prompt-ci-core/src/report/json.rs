//! `results.json` and `trace.json`.

use serde::{Deserialize, Serialize};

use super::ReportError;
use crate::runner::RunOutcome;
use crate::types::CaseResult;

/// Only fixture replay exists today.
const MODE: &str = "fixtures";

/// Render the result list as pretty JSON.
pub fn render_results(results: &[CaseResult]) -> Result<String, ReportError> {
    serde_json::to_string_pretty(results).map_err(|source| ReportError::Encode {
        name: super::RESULTS_FILE,
        source,
    })
}

/// Run timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trace {
    pub suite_name: String,
    pub mode: String,
    pub started_at: String,
    pub completed_at: String,
    pub entries: Vec<TraceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceEntry {
    pub case_id: String,
    pub mode: String,
    pub started_at: String,
    pub completed_at: String,
}

impl Trace {
    pub fn from_outcome(suite_name: &str, outcome: &RunOutcome) -> Self {
        let started_at = outcome.started_at.to_rfc3339();
        let completed_at = outcome.completed_at.to_rfc3339();

        let entries = outcome
            .results
            .iter()
            .map(|r| TraceEntry {
                case_id: r.id.clone(),
                mode: MODE.to_string(),
                started_at: started_at.clone(),
                completed_at: completed_at.clone(),
            })
            .collect();

        Self {
            suite_name: suite_name.to_string(),
            mode: MODE.to_string(),
            started_at,
            completed_at,
            entries,
        }
    }
}

pub fn render_trace(suite_name: &str, outcome: &RunOutcome) -> Result<String, ReportError> {
    let trace = Trace::from_outcome(suite_name, outcome);
    serde_json::to_string_pretty(&trace).map_err(|source| ReportError::Encode {
        name: super::TRACE_FILE,
        source,
    })
}

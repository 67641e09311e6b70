//! Report writers.
//!
//! Every report is a pure rendering of the ordered result list; none of them
//! adds scoring or judgement of its own.
//!
//! | File           | Audience                          |
//! |----------------|-----------------------------------|
//! | `results.json` | machines, downstream tooling      |
//! | `junit.xml`    | CI test dashboards                |
//! | `report.html`  | humans                            |
//! | `trace.json`   | run timeline                      |

mod html;
mod json;
mod junit;

pub use html::render_html;
pub use json::{render_results, render_trace, Trace, TraceEntry};
pub use junit::render_junit;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::runner::RunOutcome;

pub const RESULTS_FILE: &str = "results.json";
pub const JUNIT_FILE: &str = "junit.xml";
pub const HTML_FILE: &str = "report.html";
pub const TRACE_FILE: &str = "trace.json";

/// Errors from writing reports.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode {name}: {source}")]
    Encode {
        name: &'static str,
        source: serde_json::Error,
    },
}

/// Write all four reports into `out_dir`, creating it if needed.
///
/// Returns the paths written, in the order above.
pub fn write_reports(
    out_dir: &Path,
    suite_name: &str,
    outcome: &RunOutcome,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let rendered = [
        (RESULTS_FILE, render_results(&outcome.results)?),
        (JUNIT_FILE, render_junit(suite_name, &outcome.results)),
        (HTML_FILE, render_html(suite_name, &outcome.results)),
        (TRACE_FILE, render_trace(suite_name, outcome)?),
    ];

    let mut written = Vec::with_capacity(rendered.len());
    for (name, body) in rendered {
        let path = out_dir.join(name);
        fs::write(&path, body).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "report written");
        written.push(path);
    }

    Ok(written)
}

//! JUnit XML rendering.

use std::fmt::Write;

use crate::types::{CaseResult, Status, Summary};

/// Render results as a single-suite JUnit document.
pub fn render_junit(suite_name: &str, results: &[CaseResult]) -> String {
    let summary = Summary::from_results(results);
    let total_time = results
        .iter()
        .fold(0.0, |acc, r| acc + seconds(r.duration_ms));

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<testsuites>\n");
    let _ = writeln!(
        xml,
        "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\" time=\"{}\">",
        escape_xml(suite_name),
        summary.total,
        summary.failed,
        summary.errored,
        summary.skipped,
        total_time
    );

    for result in results {
        let open = format!(
            "    <testcase name=\"{}\" classname=\"prompt-ci.{}\" time=\"{}\"",
            escape_xml(&result.id),
            escape_xml(&result.validator),
            seconds(result.duration_ms)
        );
        let details = escape_xml(&result.failure_reasons.join("\n"));

        match result.status {
            Status::Pass => {
                let _ = writeln!(xml, "{}></testcase>", open);
            }
            Status::Fail => {
                let _ = writeln!(
                    xml,
                    "{}>\n      <failure message=\"Test case failed\" type=\"AssertionError\">{}</failure>\n    </testcase>",
                    open, details
                );
            }
            Status::Error => {
                let _ = writeln!(
                    xml,
                    "{}>\n      <error message=\"Test case error\" type=\"RuntimeError\">{}</error>\n    </testcase>",
                    open, details
                );
            }
            Status::Skip => {
                let _ = writeln!(
                    xml,
                    "{}>\n      <skipped message=\"Test case skipped\"></skipped>\n    </testcase>",
                    open
                );
            }
        }
    }

    xml.push_str("  </testsuite>\n</testsuites>");
    xml
}

fn seconds(duration_ms: u64) -> f64 {
    duration_ms as f64 / 1000.0
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            c => out.push(c),
        }
    }
    out
}

//! Self-contained HTML dashboard.

use std::fmt::Write;

use crate::types::{CaseResult, Summary};

const STYLE: &str = r#"
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; padding: 20px; max-width: 1200px; margin: 0 auto; background: #f5f5f5; }
        h1 { margin-bottom: 20px; color: #333; }
        .summary { display: flex; gap: 20px; margin-bottom: 30px; }
        .summary-card { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); flex: 1; text-align: center; }
        .summary-card h2 { font-size: 2em; margin-bottom: 5px; }
        .summary-card.pass h2 { color: #22c55e; }
        .summary-card.fail h2 { color: #ef4444; }
        .summary-card.error h2 { color: #f59e0b; }
        .summary-card.total h2 { color: #3b82f6; }
        table { width: 100%; border-collapse: collapse; background: white; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        th, td { padding: 12px 15px; text-align: left; border-bottom: 1px solid #eee; }
        th { background: #f8f9fa; font-weight: 600; color: #333; }
        tr:hover { background: #f8f9fa; }
        .status { padding: 4px 12px; border-radius: 20px; font-size: 0.85em; font-weight: 500; }
        .status-pass { background: #dcfce7; color: #166534; }
        .status-fail { background: #fee2e2; color: #991b1b; }
        .status-error { background: #fef3c7; color: #92400e; }
        .status-skip { background: #e5e7eb; color: #374151; }
        .details { cursor: pointer; }
        .details:hover { text-decoration: underline; }
        .failure-reasons { display: none; background: #fef2f2; padding: 15px; margin: 10px 0; border-radius: 4px; font-family: monospace; font-size: 0.9em; white-space: pre-wrap; }
        .failure-reasons.show { display: block; }
"#;

/// Render the dashboard for a run.
pub fn render_html(suite_name: &str, results: &[CaseResult]) -> String {
    let summary = Summary::from_results(results);
    let title = escape_html(suite_name);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>prompt-ci Report - {title}</title>
    <style>{style}    </style>
</head>
<body>
    <h1>prompt-ci Report: {title}</h1>

    <div class="summary">
        <div class="summary-card pass"><h2>{passed}</h2><p>Passed</p></div>
        <div class="summary-card fail"><h2>{failed}</h2><p>Failed</p></div>
        <div class="summary-card error"><h2>{errored}</h2><p>Errors</p></div>
        <div class="summary-card total"><h2>{total}</h2><p>Total</p></div>
    </div>

    <table>
        <thead>
            <tr>
                <th>Case ID</th>
                <th>Validator</th>
                <th>Status</th>
                <th>Duration</th>
                <th>Details</th>
            </tr>
        </thead>
        <tbody>
"#,
        style = STYLE,
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        total = summary.total,
    );

    for result in results {
        let details = if result.failure_reasons.is_empty() {
            "-".to_string()
        } else {
            format!(
                "<span class=\"details\" onclick=\"this.nextElementSibling.classList.toggle('show')\">Show failures</span>\n                    <div class=\"failure-reasons\">{}</div>",
                escape_html(&result.failure_reasons.join("\n"))
            )
        };

        let _ = write!(
            html,
            r#"            <tr>
                <td>{id}</td>
                <td>{validator}</td>
                <td><span class="status status-{class}">{status}</span></td>
                <td>{duration}ms</td>
                <td>
                    {details}
                </td>
            </tr>
"#,
            id = escape_html(&result.id),
            validator = escape_html(&result.validator),
            class = result.status.as_str().to_lowercase(),
            status = result.status,
            duration = result.duration_ms,
        );
    }

    html.push_str("        </tbody>\n    </table>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

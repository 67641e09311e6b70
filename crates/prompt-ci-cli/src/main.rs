//! prompt-ci - deterministic eval suites for LLM prompts
//!
//! ## Commands
//!
//! - `validate`: check a suite file and that every case has a fixture
//! - `run`: evaluate every case against its fixture and write reports
//!
//! Exit codes: 0 all cases passed, 1 at least one case failed, 2 a case
//! errored or the suite could not be loaded or validated.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prompt_ci_core::{validate_suite, write_reports, FixtureDir, Runner, Suite};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit code for setup, parse and validation errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "prompt-ci")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate LLM eval suites against recorded fixtures", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a suite file
    Validate {
        /// Path to the suite YAML
        #[arg(long, env = "PROMPT_CI_SUITE")]
        suite: PathBuf,

        /// Fixtures root directory
        #[arg(long, env = "PROMPT_CI_FIXTURES", default_value = "./fixtures")]
        fixtures: PathBuf,
    },

    /// Run a suite and write reports
    Run {
        /// Path to the suite YAML
        #[arg(long, env = "PROMPT_CI_SUITE")]
        suite: PathBuf,

        /// Where case outputs come from
        #[arg(long, value_enum, default_value_t = Mode::Fixtures)]
        mode: Mode,

        /// Fixtures root directory
        #[arg(long, env = "PROMPT_CI_FIXTURES", default_value = "./fixtures")]
        fixtures: PathBuf,

        /// Report output directory
        #[arg(long, env = "PROMPT_CI_OUT", default_value = "./out")]
        out: PathBuf,

        /// Stop after the first failing or erroring case
        #[arg(long, env = "PROMPT_CI_FAIL_FAST")]
        fail_fast: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Replay pre-recorded outputs from the fixtures directory
    Fixtures,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn run(command: Commands) -> Result<u8> {
    match command {
        Commands::Validate { suite, fixtures } => cmd_validate(&suite, &fixtures),
        Commands::Run {
            suite,
            mode,
            fixtures,
            out,
            fail_fast,
        } => cmd_run(&suite, mode, &fixtures, &out, fail_fast),
    }
}

fn load_suite(path: &Path) -> Result<Suite> {
    let suite = Suite::from_yaml_file(path)
        .with_context(|| format!("failed to load suite {}", path.display()))?;
    debug!(suite = %suite.name, cases = suite.cases.len(), "suite loaded");
    Ok(suite)
}

fn cmd_validate(suite_path: &Path, fixtures_root: &Path) -> Result<u8> {
    let suite = load_suite(suite_path)?;
    validate_suite(&suite, &FixtureDir::new(fixtures_root))?;

    println!("Suite '{}' is valid ({} cases)", suite.name, suite.cases.len());
    Ok(0)
}

fn cmd_run(
    suite_path: &Path,
    mode: Mode,
    fixtures_root: &Path,
    out_dir: &Path,
    fail_fast: bool,
) -> Result<u8> {
    let suite = load_suite(suite_path)?;
    let fixtures = match mode {
        Mode::Fixtures => FixtureDir::new(fixtures_root),
    };
    validate_suite(&suite, &fixtures)?;

    info!(suite = %suite.name, fixtures = %fixtures_root.display(), fail_fast, "running suite");
    let outcome = Runner::new(&suite, &fixtures).fail_fast(fail_fast).run();

    let written = write_reports(out_dir, &suite.name, &outcome)
        .with_context(|| format!("failed to write reports to {}", out_dir.display()))?;
    for path in &written {
        debug!(path = %path.display(), "report written");
    }

    let summary = outcome.summary();
    println!("prompt-ci: {}/{} cases passed", summary.passed, summary.total);
    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    const SUITE: &str = r#"
suite_name: "cli"
cases:
  - id: tool_echo
    assertions:
      - type: contains
        expected: "echo"
  - id: schema_order
    assertions:
      - type: json_schema
        expected:
          type: object
          required: [id]
          additionalProperties: false
          properties:
            id: { type: integer }
"#;

    struct Workspace {
        _tmp: TempDir,
        suite: PathBuf,
        fixtures: PathBuf,
        out: PathBuf,
    }

    fn workspace(tool_output: &str) -> Workspace {
        let tmp = TempDir::new().unwrap();
        let suite = tmp.path().join("suite.yaml");
        fs::write(&suite, SUITE).unwrap();

        let fixtures = tmp.path().join("fixtures");
        fs::create_dir_all(fixtures.join("tool")).unwrap();
        fs::create_dir_all(fixtures.join("schema")).unwrap();
        fs::write(fixtures.join("tool/tool_echo.out.json"), tool_output).unwrap();
        fs::write(fixtures.join("schema/schema_order.out.json"), "{\"id\": 7}").unwrap();

        let out = tmp.path().join("out");
        Workspace {
            _tmp: tmp,
            suite,
            fixtures,
            out,
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "prompt-ci",
            "-v",
            "run",
            "--suite",
            "suite.yaml",
            "--mode",
            "fixtures",
            "--out",
            "reports",
            "--fail-fast",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Run {
                suite,
                mode,
                out,
                fail_fast,
                ..
            } => {
                assert_eq!(suite, PathBuf::from("suite.yaml"));
                assert_eq!(mode, Mode::Fixtures);
                assert_eq!(out, PathBuf::from("reports"));
                assert!(fail_fast);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = Cli::try_parse_from([
            "prompt-ci", "run", "--suite", "s.yaml", "--mode", "live",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_complete_suite() {
        let ws = workspace("{\"tool\": \"echo\"}");
        assert_eq!(cmd_validate(&ws.suite, &ws.fixtures).unwrap(), 0);
    }

    #[test]
    fn test_validate_reports_missing_fixture() {
        let ws = workspace("echo");
        fs::remove_file(ws.fixtures.join("schema/schema_order.out.json")).unwrap();

        let err = cmd_validate(&ws.suite, &ws.fixtures).unwrap_err();
        assert!(format!("{:#}", err).contains("fixture file not found"));
    }

    #[test]
    fn test_missing_suite_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = cmd_validate(&tmp.path().join("nope.yaml"), tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read suite file"));
    }

    #[test]
    fn test_run_writes_reports_and_passes() {
        let ws = workspace("{\"tool\": \"echo\"}");
        let code = cmd_run(&ws.suite, Mode::Fixtures, &ws.fixtures, &ws.out, false).unwrap();

        assert_eq!(code, 0);
        for file in ["results.json", "junit.xml", "report.html", "trace.json"] {
            assert!(ws.out.join(file).is_file(), "{} missing", file);
        }
    }

    #[test]
    fn test_run_exit_code_reflects_failure() {
        let ws = workspace("{\"tool\": \"other\"}");
        let code = cmd_run(&ws.suite, Mode::Fixtures, &ws.fixtures, &ws.out, true).unwrap();
        assert_eq!(code, 1);

        let results: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(ws.out.join("results.json")).unwrap())
                .unwrap();
        assert_eq!(results.as_array().unwrap().len(), 1);
    }
}

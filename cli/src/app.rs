//! Command line surface and the scan pipeline behind it.
//!
//! ```text
//! load config -> discover .go files -> parse -> check_unit -> write_report
//! ```
//!
//! Reports are streamed per unit as soon as they are checked. A unit that
//! fails to read or parse aborts the run; violations never do.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use deferlint_config::{DeferlintConfig, Overrides};
use deferlint_core::{GoParser, check_unit};
use deferlint_types::UnitReport;
use deferlint_utils::discover_go_files;

use crate::report::{ReportFormat, write_report};

#[derive(Debug, Parser)]
#[command(
    name = "deferlint",
    version,
    about = "Checks that every goroutine starts with `defer panik.Catch()`"
)]
pub struct Cli {
    /// Directory to scan recursively for `.go` files (a single file with --dump-tree).
    pub root: PathBuf,

    /// Config file to use instead of `<ROOT>/deferlint.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Package of the recovery function [env: DEFERLINT_MODULE].
    #[arg(long, value_name = "NAME")]
    pub module: Option<String>,

    /// Name of the recovery function [env: DEFERLINT_FUNCTION].
    #[arg(long, value_name = "NAME")]
    pub function: Option<String>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Exit with status 1 when any violation is found.
    #[arg(long)]
    pub deny_violations: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the syntax tree of ROOT (a Go file) and exit.
    #[arg(long)]
    pub dump_tree: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            module: self.module.clone(),
            function: self.function.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub launches: usize,
    pub violations: usize,
}

impl RunSummary {
    fn record(&mut self, report: &UnitReport) {
        self.files += 1;
        self.launches += report.findings().len();
        self.violations += report.violation_count();
    }

    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.violations > 0
    }
}

/// Run the command, writing the report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<RunSummary> {
    if cli.dump_tree {
        return dump_tree(cli, out);
    }

    let (source, file_config) = DeferlintConfig::load(cli.config.as_deref(), &cli.root)
        .context("failed to load configuration")?;
    let config = file_config
        .resolve(source, &cli.overrides())
        .context("invalid configuration")?;
    if let Some(path) = &config.source {
        tracing::info!(path = %path.display(), "Using config file");
    }
    tracing::debug!(
        module = config.convention.module(),
        function = config.convention.function(),
        "Resolved convention"
    );

    let files = discover_go_files(&cli.root, &config.scan)?;
    let mut parser = GoParser::new()?;
    let mut summary = RunSummary::default();

    for path in files {
        let unit = parser.parse_file(&path)?;
        let report = check_unit(&unit, &config.convention);
        write_report(out, cli.format, &report, &config.convention)
            .context("failed to write report")?;
        summary.record(&report);
    }
    out.flush().context("failed to flush report")?;

    tracing::info!(
        files = summary.files,
        launches = summary.launches,
        violations = summary.violations,
        "Scan finished"
    );
    Ok(summary)
}

fn dump_tree<W: Write>(cli: &Cli, out: &mut W) -> Result<RunSummary> {
    let mut parser = GoParser::new()?;
    let unit = parser.parse_file(&cli.root)?;
    out.write_all(unit.dump_tree().as_bytes())
        .context("failed to write syntax tree")?;
    out.flush().context("failed to flush syntax tree")?;
    Ok(RunSummary {
        files: 1,
        ..RunSummary::default()
    })
}

//! deferlint CLI - binary entry point.
//!
//! Exit status:
//! - 0: scan completed (violations are reported, not fatal)
//! - 1: `--deny-violations` and at least one violation
//! - 2: bad root path, bad config, or a file that fails to read or parse

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use deferlint::{Cli, run};

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = run(&cli, &mut out);
    match result {
        Ok(summary) if cli.deny_violations && summary.has_violations() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            drop(out);
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

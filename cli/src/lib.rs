//! deferlint command line front end.
//!
//! Ties discovery, configuration, checking, and rendering together. The
//! binary in `main.rs` only sets up logging and maps [`RunSummary`] to an
//! exit status.

pub mod app;
pub mod report;

pub use app::{Cli, RunSummary, run};
pub use report::{PASS_MARKER, ReportFormat, render, write_report};

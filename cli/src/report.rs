//! Rendering of unit reports for the console.
//!
//! `text` is the legacy line layout that existing scripts grep for. `compact`
//! and `json` are for editors and CI.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use deferlint_types::{ConventionSpec, Outcome, Position, UnitReport};
use deferlint_utils::normalize_path;

pub const PASS_MARKER: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Block per launch: header line, verdict, blank line.
    #[default]
    Text,
    /// `path:line:col: code: message`, violations only.
    Compact,
    /// One JSON object per launch.
    Json,
}

#[derive(Serialize)]
struct JsonFinding {
    path: String,
    position: Position,
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Write `report` to `out` in `format`.
pub fn write_report<W: Write>(
    out: &mut W,
    format: ReportFormat,
    report: &UnitReport,
    spec: &ConventionSpec,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text(out, report, spec),
        ReportFormat::Compact => write_compact(out, report, spec),
        ReportFormat::Json => write_json(out, report, spec),
    }
}

/// Render to a string; handy for tests and snapshots.
#[must_use]
pub fn render(format: ReportFormat, report: &UnitReport, spec: &ConventionSpec) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buf, format, report, spec);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_text<W: Write>(out: &mut W, report: &UnitReport, spec: &ConventionSpec) -> io::Result<()> {
    for (path, finding) in report.pairs() {
        writeln!(
            out,
            "Go statement found at file: {} position:{} ",
            path.display(),
            finding.position().legacy_offset()
        )?;
        match finding.outcome() {
            Outcome::Pass => writeln!(out, "{PASS_MARKER}")?,
            Outcome::Violation(kind) => writeln!(out, "{}", kind.message(spec))?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_compact<W: Write>(
    out: &mut W,
    report: &UnitReport,
    spec: &ConventionSpec,
) -> io::Result<()> {
    for (path, finding) in report.pairs() {
        let Some(kind) = finding.outcome().violation() else {
            continue;
        };
        writeln!(
            out,
            "{}:{}: {}: {}",
            display_path(path),
            finding.position(),
            kind.code(),
            kind.message(spec)
        )?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, report: &UnitReport, spec: &ConventionSpec) -> io::Result<()> {
    for (path, finding) in report.pairs() {
        let kind = finding.outcome().violation();
        let record = JsonFinding {
            path: display_path(path),
            position: finding.position(),
            outcome: finding.outcome(),
            code: kind.map(|k| k.code()),
            message: kind.map(|k| k.message(spec)),
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    normalize_path(path)
}

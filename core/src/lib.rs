//! Recovery-convention checks for Go `go` statements.
//!
//! ```text
//! GoParser::parse -> SourceUnit::launches() -> rules::check_launch -> Finding
//! ```
//!
//! Every launched task must open with `defer <module>.<function>()`. The
//! scanner lowers each `go` statement into a [`LaunchStatement`]; the rule
//! engine maps it to a [`Finding`]. Nothing here does IO except
//! [`GoParser::parse_file`], and nothing holds state between calls, so units
//! can be checked from many threads at once.

pub mod rules;
mod scanner;
mod source;

pub use deferlint_types::{
    Callable, ConventionSpec, Finding, LaunchStatement, Outcome, Statement, UnitReport,
    ViolationKind,
};
pub use rules::{check_launch, classify};
pub use scanner::LaunchScanner;
pub use source::{GoParser, ParseError, SourceUnit};

/// Findings for every launch in `unit`, lazily, in source order.
pub fn findings<'a>(
    unit: &'a SourceUnit,
    spec: &'a ConventionSpec,
) -> impl Iterator<Item = Finding> + 'a {
    unit.launches().map(move |launch| check_launch(&launch, spec))
}

/// Check one unit and collect its findings.
#[must_use]
pub fn check_unit(unit: &SourceUnit, spec: &ConventionSpec) -> UnitReport {
    let findings: Vec<Finding> = findings(unit, spec).collect();
    let report = UnitReport::new(unit.path().to_path_buf(), findings);
    tracing::debug!(
        path = %unit.path().display(),
        launches = report.findings().len(),
        violations = report.violation_count(),
        "Checked unit"
    );
    report
}

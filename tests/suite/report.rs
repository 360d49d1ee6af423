//! Report rendering over a parsed unit.

use insta::assert_snapshot;

use deferlint::{ReportFormat, render};
use deferlint_core::{ConventionSpec, check_unit};

use crate::common::parse;

const WORKER: &str = "package worker

import \"example.com/panik\"

func Start() {
\tgo func() {
\t\tdefer panik.Catch()
\t\twork()
\t}()
\tgo func() {
\t\twork()
\t}()
\tgo panik.Catch()
\tgo other.Catch()
\tgo run()
\tgo factory()()
}
";

fn rendered(format: ReportFormat) -> String {
    let unit = parse("worker/start.go", WORKER);
    let spec = ConventionSpec::default();
    render(format, &check_unit(&unit, &spec), &spec)
}

#[test]
fn text_report_matches_legacy_layout() {
    let header = |pos: usize| format!("Go statement found at file: worker/start.go position:{pos} \n");
    let expected = [
        (61, "OK"),
        (110, "First statement should be 'defer panik.Catch()'"),
        (137, "OK"),
        (155, "Deferred function should call 'Catch()' in 'panik' package"),
        (173, "Deferred function should be 'Catch()'"),
        (183, "Go statement should always call a func lit"),
    ]
    .iter()
    .map(|(pos, verdict)| format!("{}{verdict}\n\n", header(*pos)))
    .collect::<String>();
    assert_eq!(rendered(ReportFormat::Text), expected);
}

#[test]
fn compact_report() {
    assert_snapshot!(rendered(ReportFormat::Compact), @r"
    worker/start.go:10:2: missing_or_wrong_recovery_defer: First statement should be 'defer panik.Catch()'
    worker/start.go:14:2: wrong_module: Deferred function should call 'Catch()' in 'panik' package
    worker/start.go:15:2: wrong_function_name: Deferred function should be 'Catch()'
    worker/start.go:16:2: not_a_direct_call: Go statement should always call a func lit
    ");
}

#[test]
fn json_report_has_one_line_per_launch() {
    let out = rendered(ReportFormat::Json);
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r["path"] == "worker/start.go"));

    let statuses: Vec<_> = records
        .iter()
        .map(|r| r["outcome"]["status"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        statuses,
        ["pass", "violation", "pass", "violation", "violation", "violation"]
    );
    assert_eq!(records[0]["position"]["line"], 6);
    assert_eq!(records[5]["code"], "not_a_direct_call");
}

#[test]
fn text_report_follows_custom_convention() {
    let unit = parse("main.go", "package main\n\nfunc main() {\n\tgo func() {}()\n\tgo work()\n}\n");
    let spec = ConventionSpec::new("safe", "Guard").unwrap();
    let out = render(ReportFormat::Text, &check_unit(&unit, &spec), &spec);
    assert!(out.contains("\nOK\n"));
    assert!(out.contains("Deferred function should be 'Guard()'"));
}

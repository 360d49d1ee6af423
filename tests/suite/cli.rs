//! Whole-pipeline runs over temporary source trees.

use clap::Parser;

use deferlint::{Cli, RunSummary, run};

use crate::common::{RECOVERED, UNRECOVERED, source_tree, write_file};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("deferlint").chain(args.iter().copied()))
        .expect("valid arguments")
}

fn run_to_string(cli: &Cli) -> anyhow::Result<(RunSummary, String)> {
    let mut out = Vec::new();
    let summary = run(cli, &mut out)?;
    Ok((summary, String::from_utf8(out).expect("utf-8 report")))
}

#[test]
fn scans_tree_and_counts_violations() {
    let dir = source_tree(&[
        ("svc/start.go", RECOVERED),
        ("svc/stop.go", UNRECOVERED),
        ("README.md", "not go"),
    ]);
    let root = dir.path().to_str().unwrap();

    let (summary, out) = run_to_string(&cli(&[root])).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            files: 2,
            launches: 2,
            violations: 1
        }
    );

    let blocks: Vec<_> = out.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].contains("start.go position:"));
    assert!(blocks[0].ends_with("\nOK"));
    assert!(blocks[1].contains("stop.go position:"));
    assert!(blocks[1].ends_with("First statement should be 'defer panik.Catch()'"));
}

#[test]
fn compact_format_lists_violations_only() {
    let dir = source_tree(&[("a.go", RECOVERED), ("b.go", UNRECOVERED)]);
    let root = dir.path().to_str().unwrap();

    let (_, out) = run_to_string(&cli(&[root, "--format", "compact"])).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("b.go:4:2: missing_or_wrong_recovery_defer: First statement should be 'defer panik.Catch()'"));
}

#[test]
fn config_file_in_root_sets_convention() {
    let dir = source_tree(&[
        (
            "deferlint.toml",
            "[convention]\nmodule = \"safe\"\nfunction = \"Guard\"\n\n[scan]\nexclude = [\"gen/**\"]\n",
        ),
        (
            "main.go",
            "package main\n\nfunc main() {\n\tgo func() {\n\t\tdefer safe.Guard()\n\t}()\n}\n",
        ),
        ("gen/stub.go", UNRECOVERED),
    ]);
    let root = dir.path().to_str().unwrap();

    let (summary, out) = run_to_string(&cli(&[root])).unwrap();
    assert_eq!(summary.files, 1);
    assert_eq!(summary.violations, 0);
    assert!(out.contains("\nOK\n"));
}

#[test]
fn flags_override_config_file() {
    let dir = source_tree(&[
        ("deferlint.toml", "[convention]\nmodule = \"safe\"\n"),
        ("main.go", RECOVERED),
    ]);
    let root = dir.path().to_str().unwrap();

    let (summary, _) = run_to_string(&cli(&[root, "--module", "panik"])).unwrap();
    assert_eq!(summary.violations, 0);

    let (summary, _) = run_to_string(&cli(&[root])).unwrap();
    assert_eq!(summary.violations, 1);
}

#[test]
fn explicit_config_path_is_used() {
    let dir = source_tree(&[("src/main.go", RECOVERED)]);
    write_file(dir.path(), "conf/strict.toml", "[convention]\nfunction = \"Guard\"\n");
    let root = dir.path().join("src");
    let config = dir.path().join("conf/strict.toml");

    let (summary, _) = run_to_string(&cli(&[
        root.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]))
    .unwrap();
    assert_eq!(summary.violations, 1);
}

#[test]
fn missing_root_fails() {
    let dir = source_tree(&[]);
    let root = dir.path().join("absent");
    let err = run_to_string(&cli(&[root.to_str().unwrap()])).unwrap_err();
    assert!(format!("{err:#}").contains("failed to locate path"));
}

#[test]
fn file_root_fails() {
    let dir = source_tree(&[("main.go", RECOVERED)]);
    let root = dir.path().join("main.go");
    let err = run_to_string(&cli(&[root.to_str().unwrap()])).unwrap_err();
    assert!(format!("{err:#}").contains("is not a directory"));
}

#[test]
fn unparseable_file_aborts_the_run() {
    let dir = source_tree(&[
        ("a.go", RECOVERED),
        ("b.go", "package broken\n\nfunc main() {\n\tgo func( {\n"),
    ]);
    let root = dir.path().to_str().unwrap();

    let mut out = Vec::new();
    let err = run(&cli(&[root]), &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("syntax error"));
    // Units before the broken one were already reported.
    assert!(String::from_utf8_lossy(&out).contains("a.go position:"));
}

#[test]
fn invalid_config_fails() {
    let dir = source_tree(&[("deferlint.toml", "[convention]\nmodule = \"a.b\"\n")]);
    let root = dir.path().to_str().unwrap();
    let err = run_to_string(&cli(&[root])).unwrap_err();
    assert!(format!("{err:#}").contains("invalid configuration"));
}

#[test]
fn dump_tree_prints_outline() {
    let dir = source_tree(&[("main.go", RECOVERED)]);
    let file = dir.path().join("main.go");

    let (summary, out) = run_to_string(&cli(&[file.to_str().unwrap(), "--dump-tree"])).unwrap();
    assert_eq!(summary.files, 1);
    assert!(out.starts_with("source_file 1:1\n"));
    assert!(out.contains("defer_statement 5:3"));
}

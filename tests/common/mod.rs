//! Shared test utilities and fixtures
//!
//! Go snippets and throwaway source trees for the integration suite.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use deferlint_core::{ConventionSpec, GoParser, Outcome, SourceUnit, check_unit};
use tempfile::TempDir;

/// Wrap statements in a `main` function of package `main`.
pub fn go_main(body: &str) -> String {
    format!("package main\n\nfunc main() {{\n{body}\n}}\n")
}

pub fn parse(path: &str, source: &str) -> SourceUnit {
    GoParser::new()
        .expect("go grammar loads")
        .parse(path, source)
        .expect("fixture parses")
}

/// Outcomes for every launch in `body`, checked against the default convention.
pub fn outcomes(body: &str) -> Vec<Outcome> {
    outcomes_with(body, &ConventionSpec::default())
}

pub fn outcomes_with(body: &str, spec: &ConventionSpec) -> Vec<Outcome> {
    let unit = parse("main.go", &go_main(body));
    check_unit(&unit, spec)
        .findings()
        .iter()
        .map(|f| f.outcome())
        .collect()
}

/// Create a temp directory holding `files` (relative path, contents).
pub fn source_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (rel, contents) in files {
        write_file(dir.path(), rel, contents);
    }
    dir
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, contents).expect("write fixture");
}

pub const RECOVERED: &str = "package svc\n\nfunc Start() {\n\tgo func() {\n\t\tdefer panik.Catch()\n\t\tloop()\n\t}()\n}\n";

pub const UNRECOVERED: &str =
    "package svc\n\nfunc Stop() {\n\tgo func() {\n\t\tdrain()\n\t}()\n}\n";

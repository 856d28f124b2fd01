//! End-to-end CLI tests over `tests/fixtures/`.
//!
//! Each fixture directory contains:
//! - `blocklist.json` or `blocklist.toml`
//! - `record.json`
//! - `expected.json`: `{"blocked": bool, "outcome_codes": [..]}`
//! - optionally `expected.report.json`: the full normalized report

use assert_cmd::Command;
use mdmblock_test_util::{decision_summary, normalize_nondeterministic};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn mdmblock_cmd() -> Command {
    Command::cargo_bin("mdmblock").expect("mdmblock binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("mdmblock-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn read_json(path: &std::path::Path) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

/// Run `check` on a fixture; returns the exit code, the report file and the stdout report.
fn run_fixture(name: &str) -> (i32, Value, Value) {
    let dir = fixtures_dir().join(name);
    let rules = ["blocklist.json", "blocklist.toml"]
        .iter()
        .map(|f| dir.join(f))
        .find(|p| p.exists())
        .unwrap_or_else(|| panic!("fixture {name} has no blocklist file"));

    let temp = TempDir::new().expect("create temp dir");
    let report_path = temp.path().join("report.json");

    let output = mdmblock_cmd()
        .arg("check")
        .arg("--rules")
        .arg(&rules)
        .arg("--record")
        .arg(dir.join("record.json"))
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("run mdmblock");

    let code = output.status.code().unwrap_or(-1);
    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout is a JSON report");
    (code, read_json(&report_path), stdout)
}

fn assert_fixture(name: &str) {
    let (code, report, stdout) = run_fixture(name);
    let expected = read_json(&fixtures_dir().join(name).join("expected.json"));

    assert_eq!(decision_summary(&report), expected, "fixture {name}");
    assert_eq!(report, stdout, "fixture {name}: file and stdout reports differ");

    let expected_code = if expected["blocked"] == Value::Bool(true) { 2 } else { 0 };
    assert_eq!(code, expected_code, "fixture {name}: exit code");

    let golden = fixtures_dir().join(name).join("expected.report.json");
    if golden.exists() {
        assert_eq!(
            normalize_nondeterministic(report),
            read_json(&golden),
            "fixture {name}: golden report"
        );
    }
}

#[test]
fn fixture_empty_blocklist() {
    assert_fixture("empty_blocklist");
}

#[test]
fn fixture_family_match() {
    assert_fixture("family_match");
}

#[test]
fn fixture_family_mismatch() {
    assert_fixture("family_mismatch");
}

#[test]
fn fixture_partial_mismatch() {
    assert_fixture("partial_mismatch");
}

#[test]
fn fixture_or_rules() {
    assert_fixture("or_rules");
}

#[test]
fn fixture_other_resource_type() {
    assert_fixture("other_resource_type");
}

#[test]
fn fixture_invalid_path() {
    assert_fixture("invalid_path");
}

#[test]
fn fixture_multiple_names() {
    assert_fixture("multiple_names");
}

#[test]
fn fixture_composite_value() {
    assert_fixture("composite_value");
}

#[test]
fn fixture_toml_config() {
    assert_fixture("toml_config");
}

#[test]
fn fixture_vacuous_rule() {
    assert_fixture("vacuous_rule");
}

#[test]
fn every_fixture_directory_is_covered() {
    let covered = [
        "composite_value",
        "empty_blocklist",
        "family_match",
        "family_mismatch",
        "invalid_path",
        "multiple_names",
        "or_rules",
        "other_resource_type",
        "partial_mismatch",
        "toml_config",
        "vacuous_rule",
    ];
    let mut found: Vec<String> = std::fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    found.sort();
    assert_eq!(found, covered);
}

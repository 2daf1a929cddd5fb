//! Integration tests for the clovergate CLI.
//!
//! These run the binary as a subprocess against temporary Clover reports,
//! checking the stdout line, stderr diagnostics and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE_METRICS: &str = r#"methods="10" coveredmethods="5" conditionals="20" coveredconditionals="20" statements="100" coveredstatements="90" elements="130" coveredelements="115""#;

const EMPTY_METRICS: &str = r#"methods="0" coveredmethods="0" conditionals="0" coveredconditionals="0" statements="0" coveredstatements="0" elements="0" coveredelements="0""#;

fn clovergate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clovergate"))
}

/// Write a report whose project-level metrics carry `attributes`.
fn write_report(dir: &TempDir, attributes: &str) -> String {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<coverage generated="1700000000">
  <project timestamp="1700000000">
    <file name="src/a.php">
      <metrics methods="1" coveredmethods="0" conditionals="0" coveredconditionals="0" statements="1" coveredstatements="0" elements="2" coveredelements="0"/>
    </file>
    <metrics {}/>
  </project>
</coverage>
"#,
        attributes
    );
    write_raw(dir, &xml)
}

fn write_raw(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("clover.xml");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

// ============================================================================
// Gate decisions
// ============================================================================

#[test]
fn test_coverage_above_threshold_passes() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .args([report.as_str(), "80"])
        .assert()
        .code(0)
        .stdout("The code coverage is 88.46153846153845%\n");
}

#[test]
fn test_coverage_below_threshold_fails() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .args([report.as_str(), "90"])
        .assert()
        .code(1)
        .stdout("The code coverage is 88.46153846153845%\n");
}

#[test]
fn test_coverage_equal_to_threshold_passes() {
    let dir = TempDir::new().unwrap();
    let report = write_report(
        &dir,
        r#"methods="0" coveredmethods="0" conditionals="0" coveredconditionals="0" statements="2" coveredstatements="1" elements="2" coveredelements="1""#,
    );

    clovergate()
        .args([report.as_str(), "50"])
        .assert()
        .code(0)
        .stdout("The code coverage is 50.0%\n");
}

#[test]
fn test_zero_elements() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, EMPTY_METRICS);

    clovergate()
        .args([report.as_str(), "1"])
        .assert()
        .code(1)
        .stdout("The code coverage is 0%\n");

    clovergate()
        .args([report.as_str(), "0"])
        .assert()
        .code(0)
        .stdout("The code coverage is 0%\n");
}

#[test]
fn test_verbose_breakdown_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .args(["--verbose", report.as_str(), "80"])
        .assert()
        .code(0)
        .stdout("The code coverage is 88.46153846153845%\n")
        .stderr(predicate::str::contains("Methods: 5/10 = 50.0%"))
        .stderr(predicate::str::contains("Statements: 90/100 = 90.0%"))
        .stderr(predicate::str::contains("115/130"));
}

// ============================================================================
// Argument errors
// ============================================================================

#[test]
fn test_single_argument_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .arg(&report)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("<MINIMUM_COVER_PERCENT>"));
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .args([report.as_str(), "80", "extra"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_report() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.xml").display().to_string();

    clovergate()
        .args([missing.as_str(), "80"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Cannot retrieve the clover file"))
        .stderr(predicate::str::contains("nope.xml"));
}

#[test]
fn test_non_numeric_threshold() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .args([report.as_str(), "abc"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'abc'"));
}

#[test]
fn test_threshold_out_of_range() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    for value in ["-1", "101"] {
        clovergate()
            .args([report.as_str(), value])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(format!(
                "Minimal coverage {} percent must be in [0,100]",
                value
            )));
    }

    clovergate().args([report.as_str(), "100"]).assert().code(1);
    clovergate().args([report.as_str(), "0"]).assert().code(0);
}

#[test]
fn test_oversized_threshold_is_range_error() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, SAMPLE_METRICS);

    clovergate()
        .args([report.as_str(), "99999999999999999999"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Minimal coverage 99999999999999999999 percent must be in [0,100]",
        ));
}

// ============================================================================
// Report errors
// ============================================================================

#[test]
fn test_report_without_metrics() {
    let dir = TempDir::new().unwrap();
    let report = write_raw(&dir, "<coverage><project name=\"empty\"/></coverage>");

    clovergate()
        .args([report.as_str(), "50"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No <metrics> element"));
}

#[test]
fn test_malformed_report() {
    let dir = TempDir::new().unwrap();
    let report = write_raw(&dir, "<coverage><project></coverage>");

    clovergate()
        .args([report.as_str(), "50"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error parsing Clover XML"));
}

#[test]
fn test_metrics_missing_attribute() {
    let dir = TempDir::new().unwrap();
    let report = write_raw(
        &dir,
        r#"<coverage><metrics methods="1" coveredmethods="1"/></coverage>"#,
    );

    clovergate()
        .args([report.as_str(), "50"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'conditionals'"));
}

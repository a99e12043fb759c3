//! Integration tests for the library engine CLI.
//!
//! These tests run the actual binary and verify output against expected CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given catalog and command files and return stdout
fn run_engine(catalog: &str, commands: &str) -> String {
    let mut cmd = Command::cargo_bin("library-engine").unwrap();
    let assert = cmd.arg(catalog).arg(commands).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Normalize CSV for comparison (trim whitespace, drop blank lines)
fn normalize_csv(csv: &str) -> Vec<String> {
    csv.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_reservation_is_fulfilled_on_return() {
    let output = run_engine(
        &test_data_path("catalog.csv"),
        &test_data_path("commands_reservation.csv"),
    );
    let expected = fs::read_to_string(test_data_path("expected_reservation.csv")).unwrap();

    assert_eq!(normalize_csv(&output), normalize_csv(&expected));
}

#[test]
fn test_rejected_commands_are_skipped() {
    let output = run_engine(
        &test_data_path("catalog.csv"),
        &test_data_path("commands_errors.csv"),
    );
    let expected = fs::read_to_string(test_data_path("expected_errors.csv")).unwrap();

    assert_eq!(normalize_csv(&output), normalize_csv(&expected));
}

#[test]
fn test_rejections_are_logged() {
    let mut cmd = Command::cargo_bin("library-engine").unwrap();
    cmd.env("RUST_LOG", "warn")
        .arg(test_data_path("catalog.csv"))
        .arg(test_data_path("commands_errors.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("loan limit"))
        .stderr(predicate::str::contains("No open transaction"));
}

#[test]
fn test_duplicate_catalog_ids_are_skipped() {
    let catalog = temp_csv(
        "type,id,name\nbook,B001,First\nbook,B001,Second\nmember,M001,John\n",
    );
    let commands = temp_csv("type,borrower,item,date\nissue,M001,B001,2024-05-01\n");

    let output = run_engine(
        catalog.path().to_str().unwrap(),
        commands.path().to_str().unwrap(),
    );
    let lines = normalize_csv(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "T1001,M001,B001,2024-05-01T00:00:00Z,,0.00");
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("library-engine").unwrap();
    cmd.arg("nonexistent.csv")
        .arg("also-missing.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("library-engine").unwrap();
    cmd.arg(test_data_path("catalog.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_output_has_correct_header() {
    let output = run_engine(
        &test_data_path("catalog.csv"),
        &test_data_path("commands_reservation.csv"),
    );
    assert!(output.starts_with("tx,borrower,item,issued_at,returned_at,fine"));
}

#[test]
fn test_fines_have_two_decimal_places() {
    let output = run_engine(
        &test_data_path("catalog.csv"),
        &test_data_path("commands_reservation.csv"),
    );

    for line in output.lines().skip(1) {
        let fine = line.rsplit(',').next().unwrap();
        let dot_pos = fine.find('.').expect("fine has a decimal point");
        assert_eq!(fine.len() - dot_pos - 1, 2, "Expected 2 decimal places in: {}", fine);
    }
}

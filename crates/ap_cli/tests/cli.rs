//! crates/ap_cli/tests/cli.rs
//! End-to-end runs of the `apportion` binary: output formats, overrides,
//! validate-only, and the exit-code table.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/scenarios/base.json")
}

fn apportion() -> Command {
    let mut cmd = Command::cargo_bin("apportion").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn text_report_for_base_fixture() {
    apportion()
        .arg("--scenario")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario: Base (base-2026, base)"))
        .stdout(predicate::str::contains("Risk for PA: PA elects 3 candidate(s) (2 direct + 1 remainder)"))
        .stdout(predicate::str::contains("Outcome RES:"));
}

#[test]
fn json_output_is_canonical_and_stable() {
    let run = || {
        apportion()
            .args(["--format", "json", "--quiet", "--scenario"])
            .arg(fixture())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    let a = run();
    let b = run();
    assert_eq!(a, b);

    let doc: Value = serde_json::from_slice(&a).unwrap();
    assert!(doc["id"].as_str().unwrap().starts_with("RES:"));
    let totals: Vec<u64> = doc["allocation"]["parties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["total_seats"].as_u64().unwrap())
        .collect();
    assert_eq!(totals, [3, 2, 0, 1]);
}

#[test]
fn out_file_matches_stdout_json() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("outcome.json");

    let stdout = apportion()
        .args(["--format", "json", "--scenario"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let written = fs::read(&out).unwrap();
    assert_eq!(written, stdout.strip_suffix(b"\n").unwrap());
}

#[test]
fn seat_override_changes_the_outcome() {
    let out = apportion()
        .args(["--format", "json", "--seats", "3", "--scenario"])
        .arg(fixture())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let doc: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["config"]["seats"], 3);
    assert_eq!(doc["allocation"]["rounds"].as_array().unwrap().len(), 0);
}

#[test]
fn expected_votes_are_ranked() {
    let out = apportion()
        .args(["--format", "json", "--expected-votes", "650", "--candidate", "CARLA", "--scenario"])
        .arg(fixture())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let doc: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["ranking"]["position"], 4);
    assert_eq!(doc["ranking"]["total_candidates"], 8);

    apportion()
        .args(["--expected-votes", "650", "--scenario"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Expected 650 votes: position 4 against 9 candidate(s)"))
        .stdout(predicate::str::contains("Seat margin: ahead of PB in round 3 by 700 vote(s); PB needs 701 more"));
}

#[test]
fn validate_only_succeeds() {
    apportion()
        .arg("--validate-only")
        .arg("--scenario")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("validate-only: scenario OK (4 parties, Q=1000, S=6)"));
}

#[test]
fn non_positive_quotient_exits_with_validation() {
    apportion()
        .args(["--quotient", "0", "--scenario"])
        .arg(fixture())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quotient"));
}

#[test]
fn negative_seats_exit_with_validation() {
    apportion()
        .args(["--seats", "-1", "--scenario"])
        .arg(fixture())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("seat count must not be negative"));
}

#[test]
fn unknown_focus_exits_with_validation() {
    apportion()
        .args(["--focus", "NOPE", "--scenario"])
        .arg(fixture())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown focus party"));
}

#[test]
fn url_and_missing_paths_are_rejected() {
    apportion()
        .args(["--scenario", "https://example.org/base.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));

    let dir = tempdir().unwrap();
    apportion()
        .arg("--scenario")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn schema_violation_exits_with_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"id":"x","name":"x","quotient":1000,"seats":2,"parties":[{"name":"A"}]}"#).unwrap();

    apportion()
        .arg("--scenario")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("schema"));
}

#[test]
fn unwritable_out_path_exits_with_io() {
    let dir = tempdir().unwrap();
    // A regular file where the output directory should be.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    apportion()
        .arg("--scenario")
        .arg(fixture())
        .arg("--out")
        .arg(blocker.join("outcome.json"))
        .assert()
        .code(4);
}

//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "countdown-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_run_one_second() {
    let (stdout, _, code) = run_cli(&["run", "0:01", "--json"]);
    assert_eq!(code, 0, "Run failed");
    // Final snapshot is back in the setting phase with nothing left.
    assert!(stdout.contains("\"phase\": \"setting\""));
    assert!(stdout.contains("\"remaining\": 0"));
}

#[test]
fn test_run_zero_duration_is_a_noop() {
    let (stdout, _, code) = run_cli(&["run", "0:00"]);
    assert_eq!(code, 0, "Zero-duration run failed");
    assert!(stdout.contains("nothing to count down"));
}

#[test]
fn test_run_rejects_malformed_duration() {
    let (_, _, code) = run_cli(&["run", "ninety"]);
    assert_ne!(code, 0);
}

#[test]
fn test_run_rejects_out_of_range_seconds() {
    let (_, stderr, code) = run_cli(&["run", "0:75"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("seconds out of range"));
}

//! CLI integration tests for `codequest run`, `check` and `parse`.
//!
//! These tests invoke the compiled binary to verify end-to-end behavior.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn codequest_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_codequest"))
}

fn write_source(dir: &Path, name: &str, src: &str) -> PathBuf {
    let file = dir.join(name);
    std::fs::write(&file, src).expect("write source");
    file
}

fn invoke(args: &[&str]) -> Output {
    codequest_bin().args(args).output().expect("run binary")
}

#[test]
fn cli_run_prints_output() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(
        dir.path(),
        "loop.py",
        "for i in range(3):\n    print('Abracadabra ' + i)\n",
    );

    let output = invoke(&["run", file.to_str().unwrap()]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "codequest run should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        ["Abracadabra 0", "Abracadabra 1", "Abracadabra 2"]
    );
}

#[test]
fn cli_run_reports_error_and_fails() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "div.py", "print('lost')\nprint(5 / 0)\n");

    let output = invoke(&["run", file.to_str().unwrap()]);

    assert!(!output.status.success(), "run with error should exit non-zero");
    assert!(output.stdout.is_empty(), "output is discarded on error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: ZeroDivisionError: division by zero"),
        "stderr should carry the error: {}",
        stderr
    );
}

#[test]
fn cli_run_json_format() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "ok.py", "x = 40\nprint(x + 2)\n");

    let output = invoke(&["run", file.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(result["output"], serde_json::json!(["42"]));
    assert!(result["error"].is_null());
    assert!(result.get("kind").is_none());
}

#[test]
fn cli_run_json_error_carries_kind() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "bad.py", "for i in bananas:\n    print(i)\n");

    let output = invoke(&["run", file.to_str().unwrap(), "--format", "json"]);
    assert!(!output.status.success());

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(result["output"], serde_json::json!([]));
    assert_eq!(result["kind"], "SyntaxError");
}

#[test]
fn cli_run_step_limit() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "long.py", "for i in range(100000000):\n    x = i\n");

    let output = invoke(&["run", file.to_str().unwrap(), "--max-steps", "50"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("step limit of 50 exceeded"), "stderr: {}", stderr);
}

#[test]
fn cli_run_rejects_empty_code() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "empty.py", "\n   \n");

    let output = invoke(&["run", file.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Code is empty."), "stderr: {}", stderr);
}

#[test]
fn cli_run_missing_file() {
    let output = invoke(&["run", "/definitely/not/here.py"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {}", stderr);
}

#[test]
fn cli_check_pass_and_fail() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(
        dir.path(),
        "hoard.py",
        "gold_coins = 100\nsilver_coins = 75\nprint(gold_coins + silver_coins)\n",
    );

    let pass = invoke(&["check", file.to_str().unwrap(), "--expected", "175"]);
    let stdout = String::from_utf8_lossy(&pass.stdout);
    assert!(pass.status.success(), "check should pass: {}", stdout);
    assert!(stdout.contains("Success!"), "stdout: {}", stdout);

    let fail = invoke(&["check", file.to_str().unwrap(), "--expected", "100"]);
    let stdout = String::from_utf8_lossy(&fail.stdout);
    assert!(!fail.status.success());
    assert!(stdout.contains("Expected output:"), "stdout: {}", stdout);
}

#[test]
fn cli_check_expected_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "chant.py", "for i in range(2):\n    print('Hi')\n");
    let expected = write_source(dir.path(), "expected.txt", "Hi\nHi\n");

    let output = invoke(&[
        "check",
        file.to_str().unwrap(),
        "--expected-file",
        expected.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "check should pass: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn cli_check_requires_expected() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "a.py", "print(1)\n");

    let output = invoke(&["check", file.to_str().unwrap()]);
    assert!(!output.status.success(), "clap should reject missing --expected");
}

#[test]
fn cli_parse_lists_statements() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(
        dir.path(),
        "shapes.py",
        "# hello\nx = 1\nfor i in range(2):\n    print(i)\n",
    );

    let output = invoke(&["parse", file.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let records: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(records.len(), 5);
    assert_eq!(records[1]["stmt"]["Assign"]["target"], "x");
    assert_eq!(records[2]["stmt"]["For"]["range"]["end"], 2);
    assert_eq!(records[3]["span"]["indent"], 4);
}

#[test]
fn cli_parse_flags_bad_lines() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "bad.py", "if x:\n    print(1)\n");

    let output = invoke(&["parse", file.to_str().unwrap()]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("SyntaxError: Invalid if condition"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn cli_parse_flags_unsupported_lines() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "loop.py", "x = 1\nfor i in bananas:\n    print(i)\n");

    let output = invoke(&["parse", file.to_str().unwrap(), "--format", "json"]);
    assert!(!output.status.success(), "unsupported line should fail parse");

    let records: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(
        records[1]["error"],
        "SyntaxError: Unsupported syntax on line: \"for i in bananas:\""
    );
}

#[test]
fn cli_parse_accepts_else_after_if_body() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(
        dir.path(),
        "branch.py",
        "x = 3\nif x > 2:\n    print('big')\n\nelse:\n    print('small')\n",
    );

    let output = invoke(&["parse", file.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(!stdout.contains("<-"), "stdout: {}", stdout);
}

#[test]
fn cli_parse_flags_stray_else() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(dir.path(), "stray.py", "print(1)\nelse:\n    print(2)\n");

    let output = invoke(&["parse", file.to_str().unwrap()]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unsupported syntax"), "stdout: {}", stdout);
}

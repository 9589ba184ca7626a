//! Integration tests for the command-line interface: find, mask and check

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn recompose(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recompose"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn recompose_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_recompose"))
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

/// Helper to create a workspace with a couple of text files and a rule file
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();

    fs::write(
        dir.path().join("notes.txt"),
        "hello world\nnothing here\nworld, then hello\n",
    )
    .unwrap();

    fs::create_dir(dir.path().join("invoices")).unwrap();
    fs::write(
        dir.path().join("invoices/a.txt"),
        "Total due: 12.50\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("invoices/b.txt"),
        "VOID\nTotal due: 99.00\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("rules.toml"),
        r#"[meta]
name = "invoice-rules"
description = "Totals on invoices"

[[rules]]
name = "amount"
pattern = '\d+\.\d\d'

[[rules]]
name = "total"
mode = "seq"
members = ["(?i)total", { rule = "amount" }]
deny = ["VOID"]
"#,
    )
    .unwrap();

    dir
}

#[test]
fn test_help() {
    let output = recompose(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("find"));
    assert!(stdout.contains("mask"));
    assert!(stdout.contains("check"));
}

#[test]
fn test_find_inline_patterns() {
    let workspace = setup_workspace();
    let notes = workspace.path().join("notes.txt");

    let output = recompose(&["find", "-e", "hello", "-e", "world", notes.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("notes.txt:1:1: hello world"));
    assert!(lines[1].ends_with("notes.txt:1:7: hello world"));
    assert!(lines[2].ends_with("notes.txt:3:1: world, then hello"));
}

#[test]
fn test_find_conjunction_count() {
    let workspace = setup_workspace();
    let notes = workspace.path().join("notes.txt");

    let output = recompose(&[
        "find",
        "--mode",
        "all",
        "--count",
        "-e",
        "hello",
        "-e",
        "world",
        notes.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().ends_with("notes.txt: 1"));
}

#[test]
fn test_find_no_match_exits_nonzero() {
    let workspace = setup_workspace();
    let notes = workspace.path().join("notes.txt");

    let output = recompose(&["find", "-e", "absent", notes.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_find_with_rule_file_walks_directories() {
    let workspace = setup_workspace();
    let rules = workspace.path().join("rules.toml");
    let invoices = workspace.path().join("invoices");

    let output = recompose(&[
        "find",
        "--rules",
        rules.to_str().unwrap(),
        "--rule",
        "total",
        invoices.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a.txt:1:1: Total due: 12.50"));
    assert!(!stdout.contains("b.txt"));
}

#[test]
fn test_find_unknown_rule_lists_available() {
    let workspace = setup_workspace();
    let rules = workspace.path().join("rules.toml");

    let output = recompose(&["find", "--rules", rules.to_str().unwrap(), "--rule", "totl"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no rule named 'totl'"));
    assert!(stderr.contains("amount, total"));
}

#[test]
fn test_find_reads_stdin() {
    let output = recompose_stdin(&["find", "-i", "-e", "error"], "ok\nERROR: disk\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "<stdin>:2:1: ERROR: disk");
}

#[test]
fn test_mask_stdin() {
    let output = recompose_stdin(
        &["mask", "-e", r"\d{4}", "--placeholder", "#"],
        "card 1234 5678\n",
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "card #### ####\n");
}

#[test]
fn test_mask_rejects_wide_placeholder() {
    let output = recompose_stdin(&["mask", "-e", "a", "--placeholder", "é"], "abc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("placeholder"));
}

#[test]
fn test_check_lists_rules() {
    let workspace = setup_workspace();
    let rules = workspace.path().join("rules.toml");

    let output = recompose(&["check", "--rules", rules.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invoice-rules (2 rules)"));
    assert!(stdout.contains("Totals on invoices"));
    assert!(stdout.contains(r"amount = /\d+\.\d\d/"));
    assert!(stdout.contains("total = "));
}

#[test]
fn test_check_reports_validation_errors() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("broken.toml");
    fs::write(
        &rules,
        r#"[[rules]]
name = "digits"
pattern = '\d+'

[[rules]]
name = "pair"
members = [{ rule = "digit" }, "x"]
"#,
    )
    .unwrap();

    let output = recompose(&["check", "--rules", rules.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.toml"));
    assert!(stderr.contains("did you mean 'digits'?"));
}

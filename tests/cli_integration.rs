//! CLI integration tests for shellform.
//!
//! These tests exercise the binary end to end: dialect selection, output
//! formats, topology handling, and the config file.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the shellform binary command.
fn shellform() -> Command {
    Command::cargo_bin("shellform").unwrap()
}

// ============================================================================
// shellform escape
// ============================================================================

#[test]
fn test_escape_plain_argument() {
    shellform()
        .args(["escape", "hello"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_escape_quotes_whitespace() {
    shellform()
        .args(["escape", "a b"])
        .assert()
        .success()
        .stdout("\"a b\"\n");
}

#[test]
fn test_escape_leaves_operators_alone() {
    shellform()
        .args(["escape", "&&"])
        .assert()
        .success()
        .stdout("&&\n");
}

#[test]
fn test_escape_multiple_arguments_one_per_line() {
    shellform()
        .args(["escape", "cc", "-c", "a b.c"])
        .assert()
        .success()
        .stdout("cc\n-c\n\"a b.c\"\n");
}

#[test]
fn test_escape_for_vs_ide() {
    shellform()
        .args(["escape", "--shell", "windows", "--tool", "vside", "a;b"])
        .assert()
        .success()
        .stdout("\"a\";\"b\"\n");
}

#[test]
fn test_escape_windows_shell_converts_separators() {
    shellform()
        .args(["escape", "--shell", "windows", "c:/work/a b"])
        .assert()
        .success()
        .stdout("\"c:\\work\\a b\"\n");
}

#[test]
fn test_escape_response_format_quotes_hyphens() {
    shellform()
        .args(["escape", "--format", "response", "-Iinclude"])
        .assert()
        .success()
        .stdout("\"-Iinclude\"\n");
}

#[test]
fn test_escape_rejects_unknown_format() {
    shellform()
        .args(["escape", "--format", "makefile", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

#[test]
fn test_escape_json_output() {
    shellform()
        .args(["escape", "--json", "a b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"escaped\":\"\\\"a b\\\"\""));
}

// ============================================================================
// shellform relative
// ============================================================================

#[test]
fn test_relative_within_source_tree() {
    shellform()
        .args([
            "relative",
            "--source-top",
            "/proj/src",
            "--binary-top",
            "/proj/build",
            "/proj/src/a",
            "/proj/src/a/b.h",
        ])
        .assert()
        .success()
        .stdout("b.h\n");
}

#[test]
fn test_relative_refuses_to_cross_trees() {
    shellform()
        .args([
            "relative",
            "--source-top",
            "/proj/src",
            "--binary-top",
            "/proj/build",
            "/proj/src/a",
            "/proj/build/x",
        ])
        .assert()
        .success()
        .stdout("/proj/build/x\n");
}

#[test]
fn test_relative_identical_paths_print_dot() {
    shellform()
        .args([
            "relative",
            "--source-top",
            "/proj",
            "--binary-top",
            "/proj",
            "/proj/a",
            "/proj/a",
        ])
        .assert()
        .success()
        .stdout(".\n");
}

#[test]
fn test_relative_requires_topology() {
    shellform()
        .args(["relative", "/proj/src/a", "/proj/src/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source top"));
}

// ============================================================================
// config file
// ============================================================================

#[test]
fn test_topology_from_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("shellform.toml"),
        "[paths]\nsource_top = \"/proj/src\"\nbinary_top = \"/proj/build\"\n",
    )
    .unwrap();

    shellform()
        .args(["relative", "/proj/src/a", "/proj/src/a/b.h"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout("b.h\n");
}

#[test]
fn test_env_from_explicit_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("win.toml");
    fs::write(&config, "[env]\nwindows_shell = true\n").unwrap();

    shellform()
        .args(["escape", "c:/work/a b"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("\"c:\\work\\a b\"\n");
}

#[test]
fn test_explicit_config_file_must_exist() {
    shellform()
        .args(["escape", "x", "--config", "/no/such/file.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

// ============================================================================
// shellform config-escape
// ============================================================================

#[test]
fn test_config_escape_wraps_and_escapes() {
    shellform()
        .args(["config-escape", "a\"b$c"])
        .assert()
        .success()
        .stdout("\"a\\\"b\\$c\"\n");
}

#[test]
fn test_config_escape_no_wrap() {
    shellform()
        .args(["config-escape", "--no-wrap", "a\\b"])
        .assert()
        .success()
        .stdout("a\\\\b\n");
}

// ============================================================================
// shellform completions
// ============================================================================

#[test]
fn test_completions_bash() {
    shellform()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shellform"));
}

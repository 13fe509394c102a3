//! Integration tests for the `adbfleet` binary.
//!
//! These validate argument parsing, help output, shell completions, and
//! error handling, all without a live adb server.
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `adbfleet` binary with env isolation.
///
/// Clears all `ADBFLEET_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn adbfleet_cmd() -> Command {
    let mut cmd = Command::cargo_bin("adbfleet").unwrap();
    cmd.env("HOME", "/tmp/adbfleet-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/adbfleet-test-nonexistent")
        .env_remove("ADBFLEET_SERVER")
        .env_remove("ADBFLEET_OUTPUT")
        .env_remove("ADBFLEET_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = adbfleet_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_commands() {
    adbfleet_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("devices")
            .and(predicate::str::contains("wireless"))
            .and(predicate::str::contains("tunnel")),
    );
}

#[test]
fn version_flag() {
    adbfleet_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adbfleet"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    adbfleet_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn completions_zsh() {
    adbfleet_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn config_show_prints_defaults() {
    adbfleet_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server").and(predicate::str::contains("5037")));
}

#[test]
fn config_path_prints_a_path() {
    adbfleet_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn invalid_subcommand() {
    let output = adbfleet_cmd().arg("frobnicate").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("invalid") || text.contains("frobnicate"),
        "expected error naming the bad subcommand:\n{text}"
    );
}

#[test]
fn malformed_server_address_is_a_usage_error() {
    let output = adbfleet_cmd()
        .args(["--server", "not-an-address", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("server"), "expected field name in:\n{text}");
}

#[test]
fn unreachable_server_is_a_connection_error() {
    // Port 1 is essentially never an adb server.
    let output = adbfleet_cmd()
        .args(["--server", "127.0.0.1:1", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "expected connection exit code");
}

#[test]
fn tunnel_requires_a_subcommand() {
    let output = adbfleet_cmd().arg("tunnel").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

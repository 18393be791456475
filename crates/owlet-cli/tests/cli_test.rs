//! Integration tests for the `owlet` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and credential errors — all without touching the Owlet cloud.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `owlet` binary with env isolation.
///
/// Clears all `OWLET_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn owlet_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("owlet");
    cmd.env("HOME", "/tmp/owlet-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/owlet-cli-test-nonexistent")
        .env_remove("OWLET_EMAIL")
        .env_remove("OWLET_PASSWORD")
        .env_remove("OWLET_OUTPUT")
        .env_remove("OWLET_TIMEOUT")
        .env_remove("OWLET_USER_URL")
        .env_remove("OWLET_ADS_URL");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = owlet_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    owlet_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Owlet baby monitor")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("base-station")),
    );
}

#[test]
fn test_version_flag() {
    owlet_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("owlet"));
}

#[test]
fn test_unknown_subcommand() {
    let output = owlet_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_base_station_requires_state() {
    let output = owlet_cmd()
        .args(["base-station", "AC000W000000001"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    owlet_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    owlet_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_prints_a_path() {
    owlet_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Credential errors ───────────────────────────────────────────────

#[test]
fn test_devices_without_credentials() {
    let output = owlet_cmd().arg("devices").output().unwrap();
    assert_eq!(
        output.status.code(),
        Some(3),
        "Expected auth exit code, got: {}",
        combined_output(&output)
    );
    let text = combined_output(&output);
    assert!(
        text.contains("No credentials"),
        "Expected credential error, got:\n{text}"
    );
}

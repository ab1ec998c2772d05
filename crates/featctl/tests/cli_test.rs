//! Integration tests for the `featctl` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live registry.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `featctl` binary with env isolation.
///
/// Clears all `FEATCTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn featctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("featctl");
    cmd.env("HOME", "/tmp/featctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/featctl-test-nonexistent")
        .env_remove("FEATCTL_PROFILE")
        .env_remove("FEATCTL_REGISTRY")
        .env_remove("FEATCTL_OUTPUT")
        .env_remove("FEATCTL_INSECURE")
        .env_remove("FEATCTL_TIMEOUT");
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
    let output = featctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    featctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("feature-store")
            .and(predicate::str::contains("features"))
            .and(predicate::str::contains("config"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    featctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("featctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    featctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    featctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    featctl_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = featctl_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_features_list_no_registry() {
    featctl_cmd()
        .args(["features", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("registry"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_unknown_profile_is_reported() {
    featctl_cmd()
        .args(["--profile", "nope", "features", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_config_show_no_config() {
    // `config show` renders the default config when no file exists.
    featctl_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_profiles_empty() {
    featctl_cmd()
        .args(["config", "profiles"])
        .assert()
        .success();
}

#[test]
fn test_invalid_output_format() {
    let output = featctl_cmd()
        .args(["--output", "invalid", "features", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_registry_url() {
    featctl_cmd()
        .args(["--registry", "not a url", "features", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn test_unreachable_registry_exits_with_connection_code() {
    // Port 1 refuses the connection, so the transport failure must
    // surface as the connection diagnostic with exit code 7 — not a
    // generic failure built from notice text.
    let output = featctl_cmd()
        .args(["--registry", "http://127.0.0.1:1", "features", "list"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(7),
        "Expected connection exit code 7:\n{}",
        combined_output(&output)
    );
    let text = combined_output(&output);
    assert!(
        text.contains("connect"),
        "Expected connection diagnostic:\n{text}"
    );
}

#[test]
fn test_delete_without_yes_non_interactive() {
    // stdin is not a terminal here, so delete must refuse rather than
    // hang on a confirmation prompt.
    featctl_cmd()
        .args(["--registry", "http://127.0.0.1:1", "features", "delete", "f-1"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes").or(predicate::str::contains("confirmation")));
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing registry config, not about argument parsing.
    featctl_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--insecure",
            "--timeout",
            "60",
            "features",
            "list",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("registry"))
                .or(predicate::str::contains("profile")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_features_subcommands_exist() {
    featctl_cmd()
        .args(["features", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_features_list_flags_exist() {
    featctl_cmd()
        .args(["features", "list", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--page")
                .and(predicate::str::contains("--limit"))
                .and(predicate::str::contains("--keyword"))
                .and(predicate::str::contains("--tab")),
        );
}

#[test]
fn test_features_list_rejects_unknown_tab() {
    let output = featctl_cmd()
        .args(["features", "list", "--tab", "theirs"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure for bad tab");
    let text = combined_output(&output);
    assert!(
        text.contains("possible values") || text.contains("invalid"),
        "Expected error listing valid tabs:\n{text}"
    );
}

#[test]
fn test_config_subcommands_exist() {
    featctl_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles"))
                .and(predicate::str::contains("use")),
        );
}

//! Integration tests for the `sentinel-proxy` binary's argument surface.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn proxy_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sentinel-proxy");
    cmd.env("HOME", "/tmp/sentinel-proxy-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sentinel-proxy-test-nonexistent")
        .env_remove("PORT")
        .env_remove("SENTINEL_CONFIG");
    cmd
}

#[test]
fn test_help_lists_port_flag() {
    proxy_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--port")
            .and(predicate::str::contains("PORT"))
            .and(predicate::str::contains("--players-upstream")),
    );
}

#[test]
fn test_version_flag() {
    proxy_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentinel-proxy"));
}

#[test]
fn test_non_numeric_port_is_a_usage_error() {
    proxy_cmd().arg("--port=abc").assert().code(2);
}

#[test]
fn test_invalid_players_upstream_fails_startup() {
    proxy_cmd()
        .args(["--port=0", "--players-upstream", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

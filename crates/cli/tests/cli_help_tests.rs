//! Integration tests for help output and shell completions.

mod common;

use common::apiconn_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    apiconn_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("connections"))
        .stdout(predicate::str::contains("providers"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("api-keys"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("--output-file"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    apiconn_cmd().assert().code(2);
}

#[test]
fn test_completions_are_generated_offline() {
    apiconn_cmd()
        .env("APICONN_TIMEOUT", "not-a-number")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apiconn"));
}

#[test]
fn test_render_help_mentions_template() {
    apiconn_cmd()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--escape"));
}

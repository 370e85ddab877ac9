//! Integration tests for `apiconn config` and configuration precedence.

mod common;

use common::apiconn_cmd;
use predicates::prelude::*;

fn config_json(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let output = cmd
        .args(["--output", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_production_is_the_default() {
    let json = config_json(&mut apiconn_cmd());
    assert_eq!(json["environment"], "production");
    assert_eq!(json["base_url"], "http://localhost:8000");
    assert_eq!(json["api_key"], "<not set>");
    assert_eq!(json["cache_expiry_ms"], 300000);
}

#[test]
fn test_production_uses_api_url_and_hides_key() {
    let mut cmd = apiconn_cmd();
    cmd.env("APICONN_API_URL", "https://api.example.com/")
        .env("APICONN_API_KEY", "pk_live_secret");
    let output = cmd
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pk_live_secret").not());
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["base_url"], "https://api.example.com");
    assert_eq!(json["api_key"], "<set>");
}

#[test]
fn test_development_ignores_url_overrides() {
    let mut cmd = apiconn_cmd();
    cmd.env("NODE_ENV", "development")
        .env("APICONN_API_URL", "https://api.example.com");
    let json = config_json(&mut cmd);
    assert_eq!(json["environment"], "development");
    assert_eq!(json["base_url"], "http://localhost:5001");
    assert_eq!(json["ws_url"], "ws://localhost:5001");
}

#[test]
fn test_flags_override_environment() {
    let mut cmd = apiconn_cmd();
    cmd.env("APICONN_ENV", "development")
        .env("APICONN_TIMEOUT", "10")
        .args([
            "--env",
            "production",
            "--base-url",
            "https://flag.example.com",
            "--timeout",
            "60",
        ]);
    let json = config_json(&mut cmd);
    assert_eq!(json["environment"], "production");
    assert_eq!(json["base_url"], "https://flag.example.com");
    assert_eq!(json["timeout_secs"], 60);
}

#[test]
fn test_config_show_table() {
    apiconn_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment: production"))
        .stdout(predicate::str::contains("API Key: <not set>"));
}

#[test]
fn test_config_path_honors_state_path_override() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    apiconn_cmd()
        .env("APICONN_STATE_PATH", &state)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("state.json"));
}

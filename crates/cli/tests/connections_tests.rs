//! Integration tests for `apiconn connections`.

mod common;

use common::apiconn_cmd_with_base_url;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connections_body() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "GitHub",
            "base_url": "https://api.github.com",
            "auth_type": "bearer",
            "created_at": "2024-03-05T14:07:00"
        },
        {
            "id": 2,
            "name": "Weather",
            "base_url": "https://api.openweathermap.org/data/2.5",
            "auth_type": "api_key",
            "created_at": null
        }
    ])
}

#[tokio::test]
async fn test_list_connections_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/connections"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(connections_body()))
        .expect(1)
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args(["--quiet", "connections", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID\tName\tBase URL\tAuth\tCreated"))
        .stdout(predicate::str::contains(
            "1\tGitHub\thttps://api.github.com\tbearer\tMar 05, 2024 14:07",
        ))
        .stdout(predicate::str::contains("2\tWeather"))
        .stdout(predicate::str::contains("N/A"));
}

#[tokio::test]
async fn test_list_connections_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(connections_body()))
        .mount(&server)
        .await;

    let output = apiconn_cmd_with_base_url(&server.uri())
        .args(["--quiet", "--output", "json", "connections", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "GitHub");
    assert_eq!(parsed[1]["auth_type"], "api_key");
}

#[tokio::test]
async fn test_empty_connections_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args(["--quiet", "connections", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No connections found."));
}

#[tokio::test]
async fn test_add_connection_sends_auth_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/connections"))
        .and(body_json(json!({
            "name": "Weather",
            "base_url": "https://api.openweathermap.org/data/2.5",
            "auth_type": "api_key",
            "auth_data": {"api_key": "abc123", "api_key_header": "X-API-Key"},
            "headers": {}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "name": "Weather",
            "message": "Connection created successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args([
            "connections",
            "add",
            "Weather",
            "https://api.openweathermap.org/data/2.5",
            "--auth",
            "api_key",
            "--key",
            "abc123",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[OK] create connection 5 (Weather): Connection created successfully",
        ));
}

#[tokio::test]
async fn test_add_with_failing_test_first_saves_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/test-connection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Authentication failed",
            "status_code": 401
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/connections"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args([
            "connections",
            "add",
            "GitHub",
            "https://api.github.com",
            "--auth",
            "bearer",
            "--token",
            "bad",
            "--test-first",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Connection test failed: Authentication failed",
        ));
}

#[tokio::test]
async fn test_delete_connection_with_force() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/connections/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Connection deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args(["connections", "delete", "3", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] delete connection 3"));
}

#[tokio::test]
async fn test_connection_test_reports_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/test-connection"))
        .and(body_json(json!({
            "base_url": "https://api.github.com",
            "auth_type": "bearer",
            "auth_data": {"token": "ghp"},
            "headers": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Connection test successful! Tested endpoint: /user",
            "status_code": 200,
            "test_endpoint": "/user"
        })))
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args([
            "--quiet",
            "connections",
            "test",
            "https://api.github.com",
            "--auth",
            "bearer",
            "--token",
            "ghp",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connection test successful!"))
        .stdout(predicate::str::contains("Tested Endpoint: /user"));
}

//! Integration tests for `apiconn render`.

mod common;

use common::{apiconn_cmd, apiconn_cmd_with_base_url};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_response(dir: &TempDir, body: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("response.json");
    fs::write(&path, body.to_string()).unwrap();
    path
}

#[test]
fn test_render_file_list_needs_no_backend() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, json!({"result": ["a", "b"]}));

    apiconn_cmd()
        .args(["render", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<ul class="api-list"><li class="api-list-item">a</li><li class="api-list-item">b</li></ul>"#,
        ));
}

#[test]
fn test_render_file_with_template() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, json!({"result": {"user": {"name": "Ada"}}}));

    apiconn_cmd()
        .args(["render", "--template", "<b>{{result.user.name}}</b>", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("<b>Ada</b>"));
}

#[test]
fn test_render_escape_flag() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, json!({"result": ["<script>"]}));

    apiconn_cmd()
        .args(["render", "--escape", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("&lt;script&gt;"))
        .stdout(predicate::str::contains("<script>").not());
}

#[test]
fn test_render_from_stdin_with_styles() {
    apiconn_cmd()
        .args(["render", "--with-styles", "--file", "-"])
        .write_stdin(r#"{"result": []}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<style>"))
        .stdout(predicate::str::contains("No data available"));
}

#[test]
fn test_render_invalid_json_fails() {
    apiconn_cmd()
        .args(["render", "--file", "-"])
        .write_stdin("not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Response is not valid JSON"));
}

#[test]
fn test_render_output_file() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, json!({"data": {"id": 7}}));
    let out = dir.path().join("out/render.html");

    apiconn_cmd()
        .args(["render", "--file"])
        .arg(&file)
        .arg("--output-file")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"<div class="api-object">"#));
    assert!(html.contains("<strong>id:</strong> 7"));
}

#[tokio::test]
async fn test_render_query_uses_sdk_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_json(json!({"query": "top stories", "connection_id": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": ["story one"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args(["render", "--query", "top stories", "--connection", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<li class="api-list-item">story one</li>"#,
        ));
}

#[tokio::test]
async fn test_render_query_error_prints_error_block() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    apiconn_cmd_with_base_url(&server.uri())
        .args(["render", "--query", "top stories"])
        .assert()
        .code(8)
        .stdout(predicate::str::contains(
            r#"<div class="api-error">Error: HTTP error! status: 502</div>"#,
        ));
}

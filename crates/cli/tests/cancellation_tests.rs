//! Integration tests for Ctrl+C/SIGINT handling.
//!
//! Unix-only because they send SIGINT to the child process. We assert:
//! - exit code is 130
//! - stderr contains the cancellation message

#![cfg(unix)]

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn apiconn_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("apiconn")
}

fn send_sigint(pid: u32) {
    // SAFETY: standard Unix kill syscall
    unsafe {
        libc::kill(pid as i32, libc::SIGINT);
    }
}

#[tokio::test]
async fn test_slow_query_ctrl_c_exits_130_with_message() {
    let server = MockServer::start().await;

    let request_seen = Arc::new(Notify::new());
    let request_seen_clone = Arc::clone(&request_seen);

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(move |_req: &wiremock::Request| {
            request_seen_clone.notify_one();
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(60))
                .set_body_json(serde_json::json!({"success": true, "data": []}))
        })
        .mount(&server)
        .await;

    let child = tokio::process::Command::new(apiconn_bin())
        .env("DOTENV_DISABLED", "1")
        .env_remove("APICONN_ENV")
        .env_remove("NODE_ENV")
        .env("APICONN_API_URL", server.uri())
        .env("APICONN_API_KEY", "test-key")
        .args(["--quiet", "query", "Get my repositories", "--connection", "1"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn apiconn");

    let pid = child.id().expect("child pid");
    tokio::time::timeout(Duration::from_secs(5), request_seen.notified())
        .await
        .expect("expected query request before SIGINT");
    send_sigint(pid);

    let output = tokio::time::timeout(Duration::from_secs(5), child.wait_with_output())
        .await
        .expect("process should exit promptly")
        .expect("wait_with_output ok");

    assert_eq!(output.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Operation cancelled by user"));
}

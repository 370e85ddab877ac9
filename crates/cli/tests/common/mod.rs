//! Shared test utilities for apiconn-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point the CLI at a mock backend with a dummy API key.
//!
//! Invariants / Assumptions:
//! - Host `APICONN_*`/`NODE_ENV` variables never leak into a test run.

use assert_cmd::Command;

#[allow(dead_code)]
pub const TEST_KEY: &str = "test-key";

/// Returns a hermetic `apiconn` command.
pub fn apiconn_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("apiconn");

    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("APICONN_ENV")
        .env_remove("NODE_ENV")
        .env_remove("APICONN_API_URL")
        .env_remove("APICONN_WS_URL")
        .env_remove("APICONN_ORIGIN")
        .env_remove("APICONN_API_KEY")
        .env_remove("APICONN_TIMEOUT")
        .env_remove("APICONN_CACHE_EXPIRY_MS")
        .env_remove("APICONN_DEBUG")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `apiconn` command talking to `base_url` with [`TEST_KEY`].
#[allow(dead_code)]
pub fn apiconn_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = apiconn_cmd();
    cmd.env("APICONN_API_URL", base_url)
        .env("APICONN_API_KEY", TEST_KEY);
    cmd
}

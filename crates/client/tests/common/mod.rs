//! Common test utilities for integration tests.
//!
//! Re-exports the types most tests need so each file can `use common::*;`.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use apiconn_client::testing::load_fixture;

#[allow(unused_imports)]
pub use apiconn_client::endpoints;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// An `ApiClient` pointed at the mock server, without credentials.
#[allow(dead_code)]
pub fn api_client(server: &MockServer) -> apiconn_client::ApiClient {
    apiconn_client::ApiClient::builder()
        .base_url(server.uri())
        .build()
        .expect("client should build against mock server")
}

//! Shared helpers for embed SDK integration tests.

#[allow(unused_imports)]
pub use apiconn_embed::{
    Binder, Document, EmbedClient, EmbedError, EmbedEvent, EmbedOptions, Element, EventKind,
    QueryOptions,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use std::time::Duration;

use secrecy::SecretString;

pub const TEST_KEY: &str = "pk_test_123";

/// An `EmbedClient` pointed at the mock server.
#[allow(dead_code)]
pub fn embed_client(server: &MockServer) -> EmbedClient {
    embed_client_with_expiry(server, Duration::from_secs(300))
}

#[allow(dead_code)]
pub fn embed_client_with_expiry(server: &MockServer, expiry: Duration) -> EmbedClient {
    EmbedClient::new(
        SecretString::new(TEST_KEY.into()),
        EmbedOptions {
            base_url: server.uri(),
            debug: true,
            cache_expiry: expiry,
        },
    )
    .expect("embed client should build against mock server")
}

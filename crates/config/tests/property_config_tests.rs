//! Property-based tests for configuration values.
//!
//! - Base URLs are normalized without trailing slashes regardless of input.
//! - Persisted preferences survive a JSON roundtrip.

use std::collections::BTreeSet;

use apiconn_config::{ColorTheme, ConfigLoader, PersistedState};
use proptest::prelude::*;

fn base_url_strategy() -> impl Strategy<Value = String> {
    let host = prop_oneof![
        Just("localhost"),
        Just("api.example.com"),
        Just("proxy.internal.local"),
    ];
    let scheme = prop_oneof![Just("http"), Just("https")];
    (scheme, host, 1024u16..=65535u16, 0usize..3).prop_map(|(scheme, host, port, slashes)| {
        format!("{scheme}://{host}:{port}{}", "/".repeat(slashes))
    })
}

fn theme_strategy() -> impl Strategy<Value = ColorTheme> {
    prop_oneof![
        Just(ColorTheme::Default),
        Just(ColorTheme::Light),
        Just(ColorTheme::Dark),
    ]
}

proptest! {
    #[test]
    fn prop_base_url_is_normalized(url in base_url_strategy()) {
        let config = ConfigLoader::new().with_base_url(url.clone()).build().unwrap();
        prop_assert!(!config.connection.base_url.ends_with('/'));
        prop_assert_eq!(config.connection.base_url, url.trim_end_matches('/'));
    }

    #[test]
    fn prop_persisted_state_roundtrip(
        favorites in proptest::collection::btree_set("[a-z]{3,12}", 0..8),
        page_size in 1usize..100,
        theme in theme_strategy(),
        last_connection in proptest::option::of("[0-9]{1,4}"),
    ) {
        let state = PersistedState {
            last_connection_id: last_connection,
            favorite_providers: favorites.into_iter().collect::<BTreeSet<_>>(),
            history_page_size: page_size,
            selected_theme: theme,
            last_query: None,
        };
        let json = serde_json::to_string(&state).unwrap();
        let parsed: PersistedState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, state);
    }
}

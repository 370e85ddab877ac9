//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Every test starts from a clean `APICONN_*` environment via `with_clean_env`.

mod dotenv_tests;

/// Variables read by the loader; all are cleared for the duration of a test.
const LOADER_VARS: &[&str] = &[
    "APICONN_ENV",
    "NODE_ENV",
    "APICONN_BASE_URL",
    "APICONN_API_URL",
    "APICONN_WS_URL",
    "APICONN_ORIGIN",
    "APICONN_API_KEY",
    "APICONN_TIMEOUT",
    "APICONN_CACHE_EXPIRY_MS",
    "APICONN_DEBUG",
];

/// Run `f` with every loader variable unset except those given in `vars`.
pub(super) fn with_clean_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let settings: Vec<(&str, Option<&str>)> = LOADER_VARS
        .iter()
        .map(|key| {
            let value = vars.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(settings, f)
}

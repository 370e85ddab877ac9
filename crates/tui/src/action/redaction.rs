//! Redacting wrapper for action logging.
//!
//! Connection payloads carry API keys and bearer tokens, and query text may
//! contain anything the user typed. `RedactedAction` prints those as sizes or
//! short hashes so operators can correlate log lines without reading them.
//!
//! # Invariants
//!
//! - Every variant holding credentials or user text is matched explicitly.
//! - Simple variants fall through to their derived `Debug`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::action::variants::Action;

fn redact_text(text: &str) -> String {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    format!("<{} chars, hash={:08x}>", text.len(), hasher.finish())
}

fn outcome<T>(result: &Result<T, impl Sized>) -> &'static str {
    if result.is_ok() { "ok" } else { "error" }
}

/// Log through this: `tracing::info!("Handling action: {:?}", RedactedAction(&action))`.
pub struct RedactedAction<'a>(pub &'a Action);

impl std::fmt::Debug for RedactedAction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            // Key contents may be a typed credential.
            Action::Input(_) => write!(f, "Input(<key>)"),
            Action::Notify(level, message) => {
                write!(f, "Notify({:?}, <{} chars>)", level, message.len())
            }
            Action::CreateConnection(conn) => write!(
                f,
                "CreateConnection(name={}, auth_type={})",
                conn.name, conn.auth_type
            ),
            Action::TestConnection(test) => write!(
                f,
                "TestConnection(base_url={}, auth_type={})",
                test.base_url, test.auth_type
            ),
            Action::RunQuery(request) => write!(
                f,
                "RunQuery({}, connection_id={})",
                redact_text(&request.query),
                request.connection_id
            ),
            Action::CreateApiKey(key) => {
                write!(f, "CreateApiKey(name={}, service={})", key.name, key.service)
            }
            Action::SaveSettings(settings) => {
                write!(f, "SaveSettings(<{} sections>)", settings.0.len())
            }
            Action::SavePreferences(_) => write!(f, "SavePreferences(<state>)"),

            Action::DashboardLoaded(result) => match result.as_ref() {
                Ok(data) => write!(
                    f,
                    "DashboardLoaded(<{} history, {} connections, {} providers>)",
                    data.history.len(),
                    data.connections.len(),
                    data.providers.len()
                ),
                Err(_) => write!(f, "DashboardLoaded(<error>)"),
            },
            Action::ConnectionsLoaded(result) => match result {
                Ok(items) => write!(f, "ConnectionsLoaded(<{} items>)", items.len()),
                Err(_) => write!(f, "ConnectionsLoaded(<error>)"),
            },
            Action::ProvidersLoaded(result) => match result {
                Ok(items) => write!(f, "ProvidersLoaded(<{} items>)", items.len()),
                Err(_) => write!(f, "ProvidersLoaded(<error>)"),
            },
            Action::HistoryLoaded(result) => match result {
                Ok(items) => write!(f, "HistoryLoaded(<{} items>)", items.len()),
                Err(_) => write!(f, "HistoryLoaded(<error>)"),
            },
            Action::ApiKeysLoaded(result) => match result {
                Ok(items) => write!(f, "ApiKeysLoaded(<{} items>)", items.len()),
                Err(_) => write!(f, "ApiKeysLoaded(<error>)"),
            },
            Action::SettingsLoaded(result) => write!(f, "SettingsLoaded(<{}>)", outcome(result)),
            Action::QueryCompleted(result) => write!(f, "QueryCompleted(<{}>)", outcome(result)),
            Action::ConnectionCreated(result) => {
                write!(f, "ConnectionCreated(<{}>)", outcome(result))
            }
            Action::ConnectionTested(result) => {
                write!(f, "ConnectionTested(<{}>)", outcome(result))
            }
            Action::ConnectionDeleted(result) => {
                write!(f, "ConnectionDeleted(<{}>)", outcome(result))
            }
            Action::SettingsSaved(result) => write!(f, "SettingsSaved(<{}>)", outcome(result)),
            Action::ApiKeyCreated(result) => write!(f, "ApiKeyCreated(<{}>)", outcome(result)),
            Action::ApiKeyDeleted(result) => write!(f, "ApiKeyDeleted(<{}>)", outcome(result)),
            Action::ApiKeyTested(result) => write!(f, "ApiKeyTested(<{}>)", outcome(result)),

            other => write!(f, "{:?}", other),
        }
    }
}

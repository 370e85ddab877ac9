//! Routes trigger actions to their handlers.

use std::sync::Arc;
use std::time::Instant;

use apiconn_config::ConfigManager;
use tokio::sync::{Mutex, mpsc::Sender};
use tracing::{Instrument, info_span};

use crate::action::Action;
use crate::runtime::side_effects::{
    SharedClient, TaskTracker, catalog, connections, query, settings,
};

/// Handle the side effects (API calls, preference writes) of `action`.
///
/// Actions without side effects return immediately.
pub async fn handle_side_effects(
    action: Action,
    client: SharedClient,
    tx: Sender<Action>,
    config_manager: Arc<Mutex<ConfigManager>>,
    task_tracker: TaskTracker,
) {
    let Some(action_name) = action_type_name(&action) else {
        return;
    };
    let start = Instant::now();

    let span = info_span!(
        "tui.handle_action",
        action_type = action_name,
        duration_ms = tracing::field::Empty,
    );

    async move {
        handle_action(action, client, tx, config_manager, task_tracker).await;

        let duration = start.elapsed().as_millis() as i64;
        tracing::Span::current().record("duration_ms", duration);
    }
    .instrument(span)
    .await;
}

/// Span name for actions with side effects; never includes payloads.
fn action_type_name(action: &Action) -> Option<&'static str> {
    let name = match action {
        Action::LoadDashboard => "LoadDashboard",
        Action::LoadConnections => "LoadConnections",
        Action::LoadProviders => "LoadProviders",
        Action::LoadHistory => "LoadHistory",
        Action::LoadSettings => "LoadSettings",
        Action::LoadApiKeys => "LoadApiKeys",
        Action::CreateConnection(_) => "CreateConnection",
        Action::TestConnection(_) => "TestConnection",
        Action::DeleteConnection(_) => "DeleteConnection",
        Action::RunQuery(_) => "RunQuery",
        Action::SaveSettings(_) => "SaveSettings",
        Action::CreateApiKey(_) => "CreateApiKey",
        Action::DeleteApiKey(_) => "DeleteApiKey",
        Action::TestApiKey(_) => "TestApiKey",
        Action::SavePreferences(_) => "SavePreferences",
        _ => return None,
    };
    Some(name)
}

async fn handle_action(
    action: Action,
    client: SharedClient,
    tx: Sender<Action>,
    config_manager: Arc<Mutex<ConfigManager>>,
    task_tracker: TaskTracker,
) {
    match action {
        Action::LoadDashboard => {
            catalog::handle_load_dashboard(client, tx, task_tracker).await;
        }
        Action::LoadProviders => {
            catalog::handle_load_providers(client, tx, task_tracker).await;
        }
        Action::LoadHistory => {
            catalog::handle_load_history(client, tx, task_tracker).await;
        }
        Action::LoadConnections => {
            connections::handle_load_connections(client, tx, task_tracker).await;
        }
        Action::CreateConnection(connection) => {
            connections::handle_create_connection(client, tx, task_tracker, connection).await;
        }
        Action::TestConnection(test) => {
            connections::handle_test_connection(client, tx, task_tracker, test).await;
        }
        Action::DeleteConnection(id) => {
            connections::handle_delete_connection(client, tx, task_tracker, id).await;
        }
        Action::RunQuery(request) => {
            query::handle_run_query(client, tx, task_tracker, request).await;
        }
        Action::LoadSettings => {
            settings::handle_load_settings(client, tx, task_tracker).await;
        }
        Action::SaveSettings(values) => {
            settings::handle_save_settings(client, tx, task_tracker, values).await;
        }
        Action::LoadApiKeys => {
            settings::handle_load_api_keys(client, tx, task_tracker).await;
        }
        Action::CreateApiKey(key) => {
            settings::handle_create_api_key(client, tx, task_tracker, key).await;
        }
        Action::DeleteApiKey(id) => {
            settings::handle_delete_api_key(client, tx, task_tracker, id).await;
        }
        Action::TestApiKey(id) => {
            settings::handle_test_api_key(client, tx, task_tracker, id).await;
        }
        Action::SavePreferences(state) => {
            settings::handle_save_preferences(config_manager, tx, task_tracker, state).await;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CurrentScreen;

    #[test]
    fn test_state_only_actions_have_no_name() {
        assert_eq!(action_type_name(&Action::Tick), None);
        assert_eq!(action_type_name(&Action::SwitchTo(CurrentScreen::Docs)), None);
        assert_eq!(action_type_name(&Action::LoadHistory), Some("LoadHistory"));
    }
}

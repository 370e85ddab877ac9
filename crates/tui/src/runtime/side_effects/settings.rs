//! Settings, stored API keys and local preferences.

use std::sync::Arc;

use apiconn_client::{NewApiKey, ResourceId, Settings};
use apiconn_config::{ConfigManager, PersistedState};
use tokio::sync::{Mutex, mpsc::Sender};

use super::{SharedClient, TaskTracker};
use crate::action::Action;
use crate::ui::ToastLevel;

pub async fn handle_load_settings(client: SharedClient, tx: Sender<Action>, task_tracker: TaskTracker) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        match client.get_settings().await {
            Ok(settings) => {
                let _ = tx.send(Action::SettingsLoaded(Ok(settings))).await;
            }
            Err(e) => {
                let _ = tx.send(Action::SettingsLoaded(Err(Arc::new(e)))).await;
            }
        }
    });
}

pub async fn handle_save_settings(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    settings: Settings,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.save_settings(&settings).await.map_err(Arc::new);
        let _ = tx.send(Action::SettingsSaved(result)).await;
    });
}

pub async fn handle_load_api_keys(client: SharedClient, tx: Sender<Action>, task_tracker: TaskTracker) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        match client.list_api_keys().await {
            Ok(keys) => {
                let _ = tx.send(Action::ApiKeysLoaded(Ok(keys))).await;
            }
            Err(e) => {
                let _ = tx.send(Action::ApiKeysLoaded(Err(Arc::new(e)))).await;
            }
        }
    });
}

pub async fn handle_create_api_key(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    key: NewApiKey,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.create_api_key(&key).await.map_err(Arc::new);
        let _ = tx.send(Action::ApiKeyCreated(result)).await;
    });
}

pub async fn handle_delete_api_key(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    id: ResourceId,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.delete_api_key(&id).await.map_err(Arc::new);
        let _ = tx.send(Action::ApiKeyDeleted(result)).await;
    });
}

pub async fn handle_test_api_key(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    id: ResourceId,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.test_api_key(&id).await.map_err(Arc::new);
        let _ = tx.send(Action::ApiKeyTested(result)).await;
    });
}

/// Write preferences to disk. Only failures are reported back.
pub async fn handle_save_preferences(
    config_manager: Arc<Mutex<ConfigManager>>,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    state: PersistedState,
) {
    task_tracker.spawn(async move {
        let manager = config_manager.lock().await;
        if let Err(e) = manager.save(&state) {
            tracing::error!(error = %e, "Failed to persist preferences");
            let _ = tx
                .send(Action::Notify(
                    ToastLevel::Error,
                    format!("Failed to save preferences: {e}"),
                ))
                .await;
        }
    });
}

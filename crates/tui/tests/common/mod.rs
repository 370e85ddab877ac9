//! Shared helpers for TUI side effect tests.
//!
//! Each harness owns a wiremock server, an action channel and a client
//! pointed at the server, so tests never touch a real backend.
//!
//! # Invariants
//! - Fixtures come from the client crate's `fixtures/` directory.
//! - The preferences file lives in a temp dir owned by the harness.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::{Mutex, mpsc};

pub use apiconn_client::ApiClient;
pub use apiconn_client::testing::load_fixture;
pub use apiconn_config::ConfigManager;
pub use apiconn_tui::action::Action;
pub use apiconn_tui::runtime::side_effects::{SharedClient, TaskTracker, handle_side_effects};
pub use tokio::sync::mpsc::{Receiver, Sender};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct SideEffectsTestHarness {
    pub mock_server: MockServer,
    pub action_rx: Receiver<Action>,
    pub action_tx: Sender<Action>,
    pub client: SharedClient,
    pub config_manager: Arc<Mutex<ConfigManager>>,
    pub task_tracker: TaskTracker,
    pub state_dir: TempDir,
}

impl SideEffectsTestHarness {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let (action_tx, action_rx) = mpsc::channel::<Action>(100);
        let client = create_test_client(&mock_server.uri());
        let state_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_manager = Arc::new(Mutex::new(ConfigManager::new_with_path(
            state_dir.path().join("state.json"),
        )));

        Self {
            mock_server,
            action_rx,
            action_tx,
            client,
            config_manager,
            task_tracker: TaskTracker::new(),
            state_dir,
        }
    }

    /// Run `handle_side_effects` and collect what the spawned tasks send.
    ///
    /// The handler itself must return within 100ms: it spawns, it does not
    /// wait on the network.
    pub async fn handle_and_collect(&mut self, action: Action, timeout_secs: u64) -> Vec<Action> {
        let handle_future = handle_side_effects(
            action,
            self.client.clone(),
            self.action_tx.clone(),
            self.config_manager.clone(),
            self.task_tracker.clone(),
        );
        if tokio::time::timeout(tokio::time::Duration::from_millis(100), handle_future)
            .await
            .is_err()
        {
            panic!("handle_side_effects blocked instead of spawning its work");
        }

        tokio::task::yield_now().await;

        let mut actions = Vec::new();
        let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(timeout_secs);
        while tokio::time::Instant::now() < deadline {
            match tokio::time::timeout(
                tokio::time::Duration::from_millis(100),
                self.action_rx.recv(),
            )
            .await
            {
                Ok(Some(action)) => {
                    let done = is_result(&action);
                    actions.push(action);
                    if done {
                        break;
                    }
                }
                Ok(None) => break,
                Err(_) => tokio::task::yield_now().await,
            }
        }
        actions
    }

    /// Wait for every spawned task to finish.
    pub async fn settle(&self) {
        self.task_tracker.close();
        self.task_tracker.wait().await;
    }

    /// Actions currently queued on the channel.
    pub async fn drain_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(Some(action)) = tokio::time::timeout(
            tokio::time::Duration::from_millis(10),
            self.action_rx.recv(),
        )
        .await
        {
            actions.push(action);
        }
        actions
    }
}

/// Result actions end a collection; `Loading` and `Notify` do not.
fn is_result(action: &Action) -> bool {
    !matches!(action, Action::Loading(_) | Action::Notify(..))
}

pub fn create_test_client(mock_uri: &str) -> SharedClient {
    let client = ApiClient::builder()
        .base_url(mock_uri.to_string())
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("Failed to build test client");
    Arc::new(client)
}

pub async fn mock_endpoint(
    server: &MockServer,
    method: &str,
    path: &str,
    body: serde_json::Value,
    status: u16,
) {
    use wiremock::matchers::{method as method_matcher, path as path_matcher};

    Mock::given(method_matcher(method))
        .and(path_matcher(path))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

//! Side effect handler tests against a mock backend.
//!
//! ## Invariants
//! - Every trigger answers with exactly one result action.
//! - Loads announce `Loading(true)` first; queries do not.
//! - Backend errors arrive as `Err` results carrying the backend's message.

mod common;

use apiconn_client::{
    ClientError, ConnectionTest, Credentials, NewApiKey, NewConnection, QueryRequest, ResourceId,
};
use apiconn_config::PersistedState;
use apiconn_tui::ToastLevel;
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};

fn result_of(actions: &[Action]) -> &Action {
    actions.last().expect("handler sent no actions")
}

#[tokio::test]
async fn test_load_connections_success() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "GET",
        "/api/connections",
        load_fixture("connections/list_connections.json"),
        200,
    )
    .await;

    let actions = harness.handle_and_collect(Action::LoadConnections, 2).await;

    assert!(matches!(actions.first(), Some(Action::Loading(true))));
    match result_of(&actions) {
        Action::ConnectionsLoaded(Ok(connections)) => {
            assert_eq!(connections.len(), 2);
            assert_eq!(connections[0].name, "GitHub");
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_load_connections_server_error() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "GET",
        "/api/connections",
        json!({"error": "database unavailable"}),
        500,
    )
    .await;

    let actions = harness.handle_and_collect(Action::LoadConnections, 2).await;

    match result_of(&actions) {
        Action::ConnectionsLoaded(Err(e)) => {
            assert_eq!(e.status(), Some(500));
            assert_eq!(e.user_message(), "database unavailable");
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_load_providers_attaches_categories() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "GET",
        "/api/providers",
        load_fixture("providers/list_providers.json"),
        200,
    )
    .await;
    mock_endpoint(
        &harness.mock_server,
        "GET",
        "/api/providers/categories",
        load_fixture("providers/categories.json"),
        200,
    )
    .await;

    let actions = harness.handle_and_collect(Action::LoadProviders, 2).await;

    match result_of(&actions) {
        Action::ProvidersLoaded(Ok(providers)) => {
            let github = providers.iter().find(|p| p.key == "github").expect("github");
            assert_eq!(github.category.as_deref(), Some("Developer Tools"));
            let weather = providers.iter().find(|p| p.key == "openweather").expect("weather");
            assert_eq!(weather.category, None);
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_load_dashboard_combines_three_calls() {
    let mut harness = SideEffectsTestHarness::new().await;
    let server = &harness.mock_server;
    mock_endpoint(server, "GET", "/api/history", load_fixture("history/list_history.json"), 200).await;
    mock_endpoint(
        server,
        "GET",
        "/api/connections",
        load_fixture("connections/list_connections.json"),
        200,
    )
    .await;
    mock_endpoint(
        server,
        "GET",
        "/api/providers",
        load_fixture("providers/list_providers.json"),
        200,
    )
    .await;
    mock_endpoint(
        server,
        "GET",
        "/api/providers/categories",
        load_fixture("providers/categories.json"),
        200,
    )
    .await;

    let actions = harness.handle_and_collect(Action::LoadDashboard, 2).await;

    match result_of(&actions) {
        Action::DashboardLoaded(result) => {
            let data = result.as_ref().as_ref().expect("dashboard data");
            assert_eq!(data.history.len(), 3);
            assert_eq!(data.connections.len(), 2);
            assert_eq!(data.providers.len(), 3);
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_load_dashboard_fails_when_one_call_fails() {
    let mut harness = SideEffectsTestHarness::new().await;
    let server = &harness.mock_server;
    mock_endpoint(server, "GET", "/api/history", json!({"error": "history offline"}), 503).await;
    mock_endpoint(server, "GET", "/api/connections", json!([]), 200).await;
    mock_endpoint(server, "GET", "/api/providers", json!([]), 200).await;
    mock_endpoint(server, "GET", "/api/providers/categories", json!({}), 200).await;

    let actions = harness.handle_and_collect(Action::LoadDashboard, 2).await;

    match result_of(&actions) {
        Action::DashboardLoaded(result) => {
            let err = result.as_ref().as_ref().expect_err("dashboard should fail");
            assert_eq!(err.user_message(), "history offline");
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_connection_posts_body() {
    let mut harness = SideEffectsTestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/api/connections"))
        .and(body_json(json!({
            "name": "GitHub",
            "base_url": "https://api.github.com",
            "auth_type": "bearer",
            "auth_data": {"token": "ghp_abc"},
            "headers": {}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "name": "GitHub",
            "message": "Connection created successfully"
        })))
        .expect(1)
        .mount(&harness.mock_server)
        .await;

    let conn = NewConnection::new(
        "GitHub",
        "https://api.github.com",
        &Credentials::Bearer {
            token: "ghp_abc".to_string(),
        },
    );
    let actions = harness
        .handle_and_collect(Action::CreateConnection(conn), 2)
        .await;

    match result_of(&actions) {
        Action::ConnectionCreated(Ok(created)) => assert_eq!(created.id, ResourceId::Int(5)),
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_test_connection_reports_backend_failure_in_body() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "POST",
        "/api/test-connection",
        json!({"success": false, "error": "401 Unauthorized", "status_code": 401}),
        200,
    )
    .await;

    let test = ConnectionTest {
        base_url: "https://api.github.com".to_string(),
        auth_type: apiconn_client::AuthType::None,
        auth_data: Default::default(),
        headers: Default::default(),
    };
    let actions = harness
        .handle_and_collect(Action::TestConnection(test), 2)
        .await;

    match result_of(&actions) {
        Action::ConnectionTested(Ok(outcome)) => {
            assert!(!outcome.success);
            assert_eq!(outcome.status_code, Some(401));
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_connection_not_found() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "DELETE",
        "/api/connections/9",
        json!({"error": "Connection not found"}),
        404,
    )
    .await;

    let actions = harness
        .handle_and_collect(Action::DeleteConnection(ResourceId::Int(9)), 2)
        .await;

    match result_of(&actions) {
        Action::ConnectionDeleted(Err(e)) => {
            assert!(e.is_not_found());
            assert_eq!(e.user_message(), "Connection not found");
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_run_query_skips_global_loading() {
    let mut harness = SideEffectsTestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_json(json!({"query": "Get my repositories", "connection_id": 1})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("query/query_success.json")),
        )
        .mount(&harness.mock_server)
        .await;

    let request = QueryRequest {
        query: "Get my repositories".to_string(),
        connection_id: ResourceId::Int(1),
    };
    let actions = harness.handle_and_collect(Action::RunQuery(request), 2).await;

    assert_eq!(actions.len(), 1, "query should only send its result");
    match result_of(&actions) {
        Action::QueryCompleted(Ok(response)) => {
            assert!(response.success);
            assert_eq!(response.query_id, Some(ResourceId::Int(42)));
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_run_query_backend_error() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "POST",
        "/api/query",
        json!({"success": false, "error": "Could not interpret query"}),
        400,
    )
    .await;

    let request = QueryRequest {
        query: "do the thing".to_string(),
        connection_id: ResourceId::Int(1),
    };
    let actions = harness.handle_and_collect(Action::RunQuery(request), 2).await;

    match result_of(&actions) {
        Action::QueryCompleted(Err(e)) => {
            assert!(matches!(e.as_ref(), ClientError::ApiError { status: 400, .. }));
            assert_eq!(e.user_message(), "Could not interpret query");
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_load_settings_and_api_keys() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "GET",
        "/api/settings",
        load_fixture("settings/stored_settings.json"),
        200,
    )
    .await;
    mock_endpoint(
        &harness.mock_server,
        "GET",
        "/api/api-keys",
        load_fixture("api_keys/list_api_keys.json"),
        200,
    )
    .await;

    let actions = harness.handle_and_collect(Action::LoadSettings, 2).await;
    match result_of(&actions) {
        Action::SettingsLoaded(Ok(settings)) => {
            assert_eq!(settings.get_bool("notifications", "email"), Some(true));
        }
        other => panic!("unexpected action: {:?}", other),
    }

    let actions = harness.handle_and_collect(Action::LoadApiKeys, 2).await;
    match result_of(&actions) {
        Action::ApiKeysLoaded(Ok(keys)) => {
            assert_eq!(keys.len(), 2);
            assert!(keys[0].is_active());
            assert!(!keys[1].is_active());
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_and_test_api_key() {
    let mut harness = SideEffectsTestHarness::new().await;
    mock_endpoint(
        &harness.mock_server,
        "POST",
        "/api/api-keys",
        json!({"id": 9, "message": "API key added successfully"}),
        201,
    )
    .await;
    mock_endpoint(
        &harness.mock_server,
        "POST",
        "/api/api-keys/9/test",
        json!({"success": true, "message": "API key is valid"}),
        200,
    )
    .await;

    let new_key = NewApiKey {
        name: "Weather".to_string(),
        service: "openweather".to_string(),
        key_value: "wk-123".to_string(),
    };
    let actions = harness.handle_and_collect(Action::CreateApiKey(new_key), 2).await;
    match result_of(&actions) {
        Action::ApiKeyCreated(Ok(created)) => assert_eq!(created.id, ResourceId::Int(9)),
        other => panic!("unexpected action: {:?}", other),
    }

    let actions = harness
        .handle_and_collect(Action::TestApiKey(ResourceId::Int(9)), 2)
        .await;
    match result_of(&actions) {
        Action::ApiKeyTested(Ok(outcome)) => assert!(outcome.success),
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_save_preferences_writes_file() {
    let mut harness = SideEffectsTestHarness::new().await;
    let mut state = PersistedState::default();
    state.toggle_favorite("github");

    let actions = harness
        .handle_and_collect(Action::SavePreferences(state.clone()), 0)
        .await;
    harness.settle().await;

    assert!(actions.is_empty(), "successful saves stay silent");
    let path = harness.state_dir.path().join("state.json");
    assert_eq!(ConfigManager::new_with_path(path).load(), state);
}

#[tokio::test]
async fn test_save_preferences_failure_is_reported() {
    let mut harness = SideEffectsTestHarness::new().await;
    // A directory where the file should be makes the final rename fail.
    let path = harness.state_dir.path().join("blocked");
    std::fs::create_dir_all(path.join("child")).expect("mkdir");
    harness.config_manager = std::sync::Arc::new(tokio::sync::Mutex::new(
        ConfigManager::new_with_path(path),
    ));

    harness
        .handle_and_collect(Action::SavePreferences(PersistedState::default()), 0)
        .await;
    harness.settle().await;

    let actions = harness.drain_actions().await;
    assert!(matches!(
        actions.as_slice(),
        [Action::Notify(ToastLevel::Error, message)] if message.starts_with("Failed to save preferences")
    ));
}

#[tokio::test]
async fn test_state_only_actions_are_ignored() {
    let mut harness = SideEffectsTestHarness::new().await;
    let actions = harness.handle_and_collect(Action::NextScreen, 0).await;
    assert!(actions.is_empty());
}

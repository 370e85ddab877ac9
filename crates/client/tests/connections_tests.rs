//! Connection endpoint tests.
//!
//! Covers listing, creating, deleting and testing connections, including
//! the backend's validation and authentication failures.

mod common;

use apiconn_client::{ClientError, Credentials, NewConnection, ResourceId};
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_list_connections() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("connections/list_connections.json");

    Mock::given(method("GET"))
        .and(path("/api/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let connections = endpoints::list_connections(&client, &mock_server.uri(), None, None)
        .await
        .unwrap();

    assert_eq!(connections.len(), 2);
    assert_eq!(connections[0].name, "GitHub");
    assert_eq!(connections[1].id, ResourceId::Int(2));
}

#[tokio::test]
async fn test_create_connection_sends_auth_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/connections"))
        .and(body_json(json!({
            "name": "Weather",
            "base_url": "https://api.openweathermap.org/data/2.5",
            "auth_type": "api_key",
            "auth_data": {"api_key": "abc123", "api_key_header": "X-API-Key"},
            "headers": {}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "name": "Weather",
            "message": "Connection created successfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    let conn = NewConnection::new(
        "Weather",
        "https://api.openweathermap.org/data/2.5",
        &Credentials::ApiKey {
            key: "abc123".to_string(),
            header: None,
        },
    );
    let created = client.create_connection(&conn).await.unwrap();

    assert_eq!(created.id, ResourceId::Int(5));
    assert_eq!(created.message, "Connection created successfully");
}

#[tokio::test]
async fn test_create_connection_blank_name_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/connections"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    let conn = NewConnection::new("   ", "https://api.github.com", &Credentials::None);
    let err = client.create_connection(&conn).await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_create_connection_backend_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/connections"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Missing required field: auth_type"})),
        )
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    let conn = NewConnection::new("X", "https://x.example.com", &Credentials::None);
    let err = client.create_connection(&conn).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Missing required field: auth_type");
}

#[tokio::test]
async fn test_delete_connection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/connections/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Connection deleted successfully"})),
        )
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    let resp = client.delete_connection(&ResourceId::Int(3)).await.unwrap();
    assert_eq!(resp.message, "Connection deleted successfully");
}

#[tokio::test]
async fn test_delete_connection_encodes_string_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/connections/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    client
        .delete_connection(&ResourceId::Str("a/b".to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_test_connection_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/test-connection"))
        .and(body_json(json!({
            "base_url": "https://api.github.com",
            "auth_type": "bearer",
            "auth_data": {"token": "ghp_x"},
            "headers": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status_code": 200,
            "test_endpoint": "/user",
            "response_size": 512,
            "message": "Connection test successful! Tested endpoint: /user"
        })))
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    let conn = NewConnection::new(
        "GitHub",
        "https://api.github.com",
        &Credentials::Bearer {
            token: "ghp_x".to_string(),
        },
    );
    let result = client.test_connection(&conn.as_test()).await.unwrap();

    assert!(result.success);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.test_endpoint.as_deref(), Some("/user"));
}

#[tokio::test]
async fn test_test_connection_auth_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/test-connection"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "status_code": 401,
            "test_endpoint": "/user",
            "error": "Authentication failed. Please check your credentials."
        })))
        .mount(&mock_server)
        .await;

    let client = api_client(&mock_server);
    let conn = NewConnection::new("GitHub", "https://api.github.com", &Credentials::None);
    let err = client.test_connection(&conn.as_test()).await.unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(
        err.user_message(),
        "Authentication failed. Please check your credentials."
    );
}

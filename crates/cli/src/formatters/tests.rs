use super::*;
use apiconn_client::models::ProviderSummary;
use apiconn_client::{AuthType, Interpretation, ResourceId};
use serde_json::json;

fn connection(id: i64, name: &str) -> Connection {
    Connection {
        id: ResourceId::Int(id),
        name: name.to_string(),
        base_url: "https://api.github.com".to_string(),
        auth_type: AuthType::Bearer,
        auth_data: None,
        headers: None,
        created_at: Some("2024-03-05T14:07:00".to_string()),
    }
}

fn provider() -> Provider {
    Provider {
        key: "openweather".to_string(),
        name: "OpenWeather".to_string(),
        category: Some("Weather".to_string()),
        description: "Weather data".to_string(),
        auth_type: AuthType::ApiKey,
        base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        example_queries: vec!["Weather in London".to_string()],
    }
}

#[test]
fn test_output_format_parse() {
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_empty_connections_per_format() {
    assert_eq!(
        TableFormatter.format_connections(&[]).unwrap(),
        "No connections found."
    );
    assert_eq!(JsonFormatter.format_connections(&[]).unwrap(), "[]");
    assert_eq!(
        CsvFormatter.format_connections(&[]).unwrap(),
        "id,name,base_url,auth_type,created_at\n"
    );
}

#[test]
fn test_table_connections() {
    let output = TableFormatter
        .format_connections(&[connection(1, "GitHub")])
        .unwrap();
    assert!(output.starts_with("ID\tName\tBase URL\tAuth\tCreated\n"));
    assert!(output.contains("1\tGitHub\thttps://api.github.com\tbearer\tMar 05, 2024 14:07"));
}

#[test]
fn test_csv_escapes_commas() {
    let output = CsvFormatter
        .format_connections(&[connection(2, "Acme, Inc")])
        .unwrap();
    assert!(output.contains("\"Acme, Inc\""));
}

#[test]
fn test_provider_detail_lists_examples() {
    let output = TableFormatter.format_provider(&provider()).unwrap();
    assert!(output.contains("Name: OpenWeather"));
    assert!(output.contains("Auth Type: api_key"));
    assert!(output.contains("  - Weather in London"));
}

#[test]
fn test_categories_table() {
    let mut categories = ProviderCategories::new();
    categories.insert(
        "Weather".to_string(),
        vec![ProviderSummary {
            key: "openweather".to_string(),
            name: "OpenWeather".to_string(),
            description: String::new(),
            base_url: "https://api.openweathermap.org".to_string(),
            auth_type: AuthType::ApiKey,
        }],
    );
    let output = TableFormatter.format_categories(&categories).unwrap();
    assert!(output.contains("Weather\tOpenWeather"));
    let csv = CsvFormatter.format_categories(&categories).unwrap();
    assert!(csv.contains("Weather,openweather,OpenWeather"));
}

#[test]
fn test_history_footer_and_missing_connection() {
    let page = HistoryPageOutput {
        entries: vec![HistoryRow {
            id: "7".to_string(),
            query: "Get my repositories".to_string(),
            endpoint: String::new(),
            status: "success".to_string(),
            connection: None,
            created_at: "2024-01-02 08:30:00".to_string(),
        }],
        page: 1,
        total_pages: 3,
        total_items: 21,
        label: "Showing 1 to 10 of 21 entries".to_string(),
    };
    let output = TableFormatter.format_history(&page).unwrap();
    assert!(output.contains("7\tGet my repositories\tN/A\tsuccess\tN/A\tJan 02, 2024 08:30"));
    assert!(output.ends_with("Showing 1 to 10 of 21 entries (page 1 of 3)\n"));
}

#[test]
fn test_empty_history() {
    let page = HistoryPageOutput {
        entries: Vec::new(),
        page: 1,
        total_pages: 0,
        total_items: 0,
        label: "Showing 0 to 0 of 0 entries".to_string(),
    };
    assert_eq!(TableFormatter.format_history(&page).unwrap(), "No history found.");
}

#[test]
fn test_query_response_table() {
    let response = QueryResponse {
        success: true,
        data: Some(json!({"login": "octocat"})),
        error: None,
        interpretation: Some(Interpretation {
            endpoint: "/user".to_string(),
            method: "GET".to_string(),
            params: json!({}),
            filters: json!({}),
        }),
        query_id: Some(ResourceId::Int(12)),
    };
    let output = TableFormatter.format_query_response(&response).unwrap();
    assert!(output.contains("Request: GET /user"));
    assert!(output.contains("History ID: 12"));
    assert!(output.contains("\"login\": \"octocat\""));
}

#[test]
fn test_failed_query_response_shows_error() {
    let response = QueryResponse {
        success: false,
        data: None,
        error: Some("Connection not found".to_string()),
        interpretation: None,
        query_id: None,
    };
    let output = TableFormatter.format_query_response(&response).unwrap();
    assert_eq!(output, "Error: Connection not found\n");
}

#[test]
fn test_settings_table() {
    let output = TableFormatter
        .format_settings(&Settings::defaults())
        .unwrap();
    assert!(output.contains("notifications\temail\ttrue"));
    assert!(output.contains("appearance\tlanguage\ten"));
}

#[test]
fn test_operation_output() {
    let op = OperationOutput {
        operation: "delete".to_string(),
        target: "connection 3".to_string(),
        success: true,
        message: "Connection deleted successfully".to_string(),
    };
    assert_eq!(
        TableFormatter.format_operation(&op).unwrap(),
        "[OK] delete connection 3: Connection deleted successfully\n"
    );
    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_operation(&op).unwrap()).unwrap();
    assert_eq!(json["success"], json!(true));
}

#[test]
fn test_config_view_hides_key() {
    let config = apiconn_config::ConfigLoader::new()
        .with_api_key("super-secret".to_string())
        .build()
        .unwrap();
    let view = ConfigView::from(&config);
    assert_eq!(view.api_key, "<set>");
    let output = JsonFormatter.format_config(&view).unwrap();
    assert!(!output.contains("super-secret"));
}

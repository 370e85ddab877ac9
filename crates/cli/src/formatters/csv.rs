//! CSV formatter implementation.
//!
//! Responsibilities:
//! - Format resources as RFC 4180 CSV with a header row.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;
use apiconn_client::{
    ApiKey, Connection, Provider, ProviderCategories, QueryResponse, Settings,
    TestConnectionResult,
};

use crate::formatters::common::{
    build_csv_header, build_csv_row, format_json_value, format_missing,
};
use crate::formatters::{ConfigView, Formatter, HistoryPageOutput, OperationOutput};

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_connections(&self, connections: &[Connection]) -> Result<String> {
        let mut output = build_csv_header(&["id", "name", "base_url", "auth_type", "created_at"]);
        for conn in connections {
            output.push_str(&build_csv_row(&[
                conn.id.to_string(),
                conn.name.clone(),
                conn.base_url.clone(),
                conn.auth_type.to_string(),
                format_missing(conn.created_at.as_deref()).to_string(),
            ]));
        }
        Ok(output)
    }

    fn format_test_result(&self, result: &TestConnectionResult) -> Result<String> {
        let mut output = build_csv_header(&["success", "message", "status_code", "test_endpoint"]);
        output.push_str(&build_csv_row(&[
            result.success.to_string(),
            result.summary(),
            result
                .status_code
                .map_or_else(|| "N/A".to_string(), |c| c.to_string()),
            format_missing(result.test_endpoint.as_deref()).to_string(),
        ]));
        Ok(output)
    }

    fn format_providers(&self, providers: &[Provider]) -> Result<String> {
        let mut output = build_csv_header(&["key", "name", "category", "auth_type", "base_url"]);
        for provider in providers {
            output.push_str(&build_csv_row(&[
                provider.key.clone(),
                provider.name.clone(),
                format_missing(provider.category.as_deref()).to_string(),
                provider.auth_type.to_string(),
                provider.base_url.clone(),
            ]));
        }
        Ok(output)
    }

    fn format_categories(&self, categories: &ProviderCategories) -> Result<String> {
        let mut output = build_csv_header(&["category", "key", "name"]);
        for (category, members) in categories {
            for member in members {
                output.push_str(&build_csv_row(&[
                    category.clone(),
                    member.key.clone(),
                    member.name.clone(),
                ]));
            }
        }
        Ok(output)
    }

    fn format_provider(&self, provider: &Provider) -> Result<String> {
        let mut output = build_csv_header(&[
            "key",
            "name",
            "category",
            "auth_type",
            "base_url",
            "description",
            "example_queries",
        ]);
        output.push_str(&build_csv_row(&[
            provider.key.clone(),
            provider.name.clone(),
            format_missing(provider.category.as_deref()).to_string(),
            provider.auth_type.to_string(),
            provider.base_url.clone(),
            provider.description.clone(),
            provider.example_queries.join("; "),
        ]));
        Ok(output)
    }

    fn format_history(&self, page: &HistoryPageOutput) -> Result<String> {
        let mut output = build_csv_header(&[
            "id",
            "query",
            "endpoint",
            "status",
            "connection",
            "created_at",
        ]);
        for row in &page.entries {
            output.push_str(&build_csv_row(&[
                row.id.clone(),
                row.query.clone(),
                row.endpoint.clone(),
                row.status.clone(),
                format_missing(row.connection.as_deref()).to_string(),
                row.created_at.clone(),
            ]));
        }
        Ok(output)
    }

    fn format_query_response(&self, response: &QueryResponse) -> Result<String> {
        let (method, endpoint) = response
            .interpretation
            .as_ref()
            .map(|i| (i.method.clone(), i.endpoint.clone()))
            .unwrap_or_else(|| ("N/A".to_string(), "N/A".to_string()));
        let mut output =
            build_csv_header(&["success", "method", "endpoint", "query_id", "data", "error"]);
        output.push_str(&build_csv_row(&[
            response.success.to_string(),
            method,
            endpoint,
            response
                .query_id
                .as_ref()
                .map_or_else(|| "N/A".to_string(), |id| id.to_string()),
            response
                .data
                .as_ref()
                .map(format_json_value)
                .unwrap_or_default(),
            format_missing(response.error.as_deref()).to_string(),
        ]));
        Ok(output)
    }

    fn format_settings(&self, settings: &Settings) -> Result<String> {
        let mut output = build_csv_header(&["section", "key", "value"]);
        for (section, key, value) in settings.entries() {
            output.push_str(&build_csv_row(&[
                section.to_string(),
                key.to_string(),
                format_json_value(value),
            ]));
        }
        Ok(output)
    }

    fn format_api_keys(&self, keys: &[ApiKey]) -> Result<String> {
        let mut output = build_csv_header(&["id", "name", "service", "status", "last_used"]);
        for key in keys {
            output.push_str(&build_csv_row(&[
                key.id.to_string(),
                key.name.clone(),
                key.service.clone(),
                key.status.clone(),
                format_missing(key.last_used.as_deref()).to_string(),
            ]));
        }
        Ok(output)
    }

    fn format_operation(&self, output: &OperationOutput) -> Result<String> {
        let mut csv = build_csv_header(&["operation", "target", "success", "message"]);
        csv.push_str(&build_csv_row(&[
            output.operation.clone(),
            output.target.clone(),
            output.success.to_string(),
            output.message.clone(),
        ]));
        Ok(csv)
    }

    fn format_config(&self, config: &ConfigView) -> Result<String> {
        let mut output = build_csv_header(&[
            "environment",
            "base_url",
            "ws_url",
            "timeout_secs",
            "api_key",
            "cache_expiry_ms",
            "debug",
        ]);
        output.push_str(&build_csv_row(&[
            config.environment.clone(),
            config.base_url.clone(),
            config.ws_url.clone(),
            config.timeout_secs.to_string(),
            config.api_key.clone(),
            config.cache_expiry_ms.to_string(),
            config.debug.to_string(),
        ]));
        Ok(output)
    }
}

//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format resources as tab-separated tables.
//! - Append a page footer to history output.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.

use anyhow::Result;
use apiconn_client::views::format_timestamp;
use apiconn_client::{
    ApiKey, Connection, Provider, ProviderCategories, QueryResponse, Settings,
    TestConnectionResult,
};

use crate::formatters::common::{format_json_value, format_missing};
use crate::formatters::{ConfigView, Formatter, HistoryPageOutput, OperationOutput};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_connections(&self, connections: &[Connection]) -> Result<String> {
        if connections.is_empty() {
            return Ok("No connections found.".to_string());
        }

        let mut output = String::new();
        output.push_str("ID\tName\tBase URL\tAuth\tCreated\n");
        for conn in connections {
            let created = conn.created_at.as_deref().map(format_timestamp);
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                conn.id,
                conn.name,
                conn.base_url,
                conn.auth_type,
                format_missing(created.as_deref())
            ));
        }
        Ok(output)
    }

    fn format_test_result(&self, result: &TestConnectionResult) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("{}\n", result.summary()));
        if let Some(code) = result.status_code {
            output.push_str(&format!("Status Code: {}\n", code));
        }
        if let Some(endpoint) = &result.test_endpoint {
            output.push_str(&format!("Tested Endpoint: {}\n", endpoint));
        }
        Ok(output)
    }

    fn format_providers(&self, providers: &[Provider]) -> Result<String> {
        if providers.is_empty() {
            return Ok("No providers found.".to_string());
        }

        let mut output = String::new();
        output.push_str("Key\tName\tCategory\tAuth\tBase URL\n");
        for provider in providers {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                provider.key,
                provider.name,
                format_missing(provider.category.as_deref()),
                provider.auth_type,
                provider.base_url
            ));
        }
        Ok(output)
    }

    fn format_categories(&self, categories: &ProviderCategories) -> Result<String> {
        if categories.is_empty() {
            return Ok("No categories found.".to_string());
        }

        let mut output = String::new();
        output.push_str("Category\tProviders\n");
        for (category, members) in categories {
            let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
            output.push_str(&format!("{}\t{}\n", category, names.join(", ")));
        }
        Ok(output)
    }

    fn format_provider(&self, provider: &Provider) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("Name: {}\n", provider.name));
        output.push_str(&format!("Key: {}\n", provider.key));
        output.push_str(&format!(
            "Category: {}\n",
            format_missing(provider.category.as_deref())
        ));
        output.push_str(&format!("Auth Type: {}\n", provider.auth_type));
        output.push_str(&format!("Base URL: {}\n", provider.base_url));
        if !provider.description.is_empty() {
            output.push_str(&format!("Description: {}\n", provider.description));
        }
        if !provider.example_queries.is_empty() {
            output.push_str("Example Queries:\n");
            for example in &provider.example_queries {
                output.push_str(&format!("  - {}\n", example));
            }
        }
        Ok(output)
    }

    fn format_history(&self, page: &HistoryPageOutput) -> Result<String> {
        if page.total_items == 0 {
            return Ok("No history found.".to_string());
        }

        let mut output = String::new();
        if page.entries.is_empty() {
            output.push_str(&format!(
                "Page {} is out of range.\n",
                page.page
            ));
        } else {
            output.push_str("ID\tQuery\tEndpoint\tStatus\tConnection\tCreated\n");
            for row in &page.entries {
                let endpoint = if row.endpoint.is_empty() {
                    None
                } else {
                    Some(row.endpoint.as_str())
                };
                output.push_str(&format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\n",
                    row.id,
                    row.query,
                    format_missing(endpoint),
                    row.status,
                    format_missing(row.connection.as_deref()),
                    format_timestamp(&row.created_at)
                ));
            }
        }
        output.push_str(&format!(
            "{} (page {} of {})\n",
            page.label, page.page, page.total_pages
        ));
        Ok(output)
    }

    fn format_query_response(&self, response: &QueryResponse) -> Result<String> {
        let mut output = String::new();
        if let Some(interpretation) = &response.interpretation {
            output.push_str(&format!("Request: {}\n", interpretation.summary()));
        }
        if let Some(id) = &response.query_id {
            output.push_str(&format!("History ID: {}\n", id));
        }
        if !response.success {
            output.push_str(&format!(
                "Error: {}\n",
                response.error.as_deref().unwrap_or("query failed")
            ));
            return Ok(output);
        }
        match &response.data {
            Some(data) => {
                output.push_str(&serde_json::to_string_pretty(data)?);
                output.push('\n');
            }
            None => output.push_str("No data returned.\n"),
        }
        Ok(output)
    }

    fn format_settings(&self, settings: &Settings) -> Result<String> {
        let entries: Vec<_> = settings.entries().collect();
        if entries.is_empty() {
            return Ok("No settings found.".to_string());
        }

        let mut output = String::new();
        output.push_str("Section\tKey\tValue\n");
        for (section, key, value) in entries {
            output.push_str(&format!(
                "{}\t{}\t{}\n",
                section,
                key,
                format_json_value(value)
            ));
        }
        Ok(output)
    }

    fn format_api_keys(&self, keys: &[ApiKey]) -> Result<String> {
        if keys.is_empty() {
            return Ok("No API keys found.".to_string());
        }

        let mut output = String::new();
        output.push_str("ID\tName\tService\tStatus\tLast Used\n");
        for key in keys {
            let last_used = key.last_used.as_deref().map(format_timestamp);
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                key.id,
                key.name,
                key.service,
                key.status,
                format_missing(last_used.as_deref())
            ));
        }
        Ok(output)
    }

    fn format_operation(&self, output: &OperationOutput) -> Result<String> {
        let status = if output.success { "OK" } else { "FAILED" };
        Ok(format!(
            "[{}] {} {}: {}\n",
            status, output.operation, output.target, output.message
        ))
    }

    fn format_config(&self, config: &ConfigView) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("Environment: {}\n", config.environment));
        output.push_str(&format!("Base URL: {}\n", config.base_url));
        output.push_str(&format!("WebSocket URL: {}\n", config.ws_url));
        output.push_str(&format!("Timeout: {}s\n", config.timeout_secs));
        output.push_str(&format!("API Key: {}\n", config.api_key));
        output.push_str(&format!("Cache Expiry: {}ms\n", config.cache_expiry_ms));
        output.push_str(&format!("Debug: {}\n", config.debug));
        Ok(output)
    }
}

//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format all resource types as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;
use apiconn_client::{
    ApiKey, Connection, Provider, ProviderCategories, QueryResponse, Settings,
    TestConnectionResult,
};

use crate::formatters::{ConfigView, Formatter, HistoryPageOutput, OperationOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_connections(&self, connections: &[Connection]) -> Result<String> {
        Ok(serde_json::to_string_pretty(connections)?)
    }

    fn format_test_result(&self, result: &TestConnectionResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn format_providers(&self, providers: &[Provider]) -> Result<String> {
        Ok(serde_json::to_string_pretty(providers)?)
    }

    fn format_categories(&self, categories: &ProviderCategories) -> Result<String> {
        Ok(serde_json::to_string_pretty(categories)?)
    }

    fn format_provider(&self, provider: &Provider) -> Result<String> {
        Ok(serde_json::to_string_pretty(provider)?)
    }

    fn format_history(&self, page: &HistoryPageOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(page)?)
    }

    fn format_query_response(&self, response: &QueryResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(response)?)
    }

    fn format_settings(&self, settings: &Settings) -> Result<String> {
        Ok(serde_json::to_string_pretty(settings)?)
    }

    fn format_api_keys(&self, keys: &[ApiKey]) -> Result<String> {
        Ok(serde_json::to_string_pretty(keys)?)
    }

    fn format_operation(&self, output: &OperationOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(output)?)
    }

    fn format_config(&self, config: &ConfigView) -> Result<String> {
        Ok(serde_json::to_string_pretty(config)?)
    }
}

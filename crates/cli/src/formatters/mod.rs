//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide the JSON, Table and CSV output formats.
//! - Implement the `Formatter` trait for every backend resource the CLI prints.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//! - Terminal UI rendering (see `crates/tui`).
//! - SDK HTML rendering (see `apiconn_embed::render`).
//!
//! Invariants:
//! - Tables use tab-separation.
//! - Empty lists: JSON prints `[]`, CSV prints the header row only, Table prints
//!   a `No X found.` message.
//! - Missing values print as `N/A` in Table and CSV output.

use anyhow::Result;
use apiconn_client::{
    ApiKey, Connection, HistoryEntry, Provider, ProviderCategories, QueryResponse, Settings,
    TestConnectionResult,
};
use apiconn_config::Config;
use secrecy::ExposeSecret;
use serde::Serialize;

mod common;
mod csv;
mod json;
mod table;

pub use common::{output_result, write_to_file};
pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table, csv", s),
        }
    }
}

/// One history row with the connection id resolved to a name.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub query: String,
    pub endpoint: String,
    pub status: String,
    pub connection: Option<String>,
    pub created_at: String,
}

impl HistoryRow {
    pub fn new(entry: &HistoryEntry, connection: Option<String>) -> Self {
        Self {
            id: entry.id.to_string(),
            query: entry.user_query.clone(),
            endpoint: entry.endpoint().to_string(),
            status: entry.status.as_str().to_string(),
            connection,
            created_at: entry.created_at.clone(),
        }
    }
}

/// A page of history plus its position.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPageOutput {
    pub entries: Vec<HistoryRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub label: String,
}

/// Result of a create/update/delete/test mutation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutput {
    pub operation: String,
    pub target: String,
    pub success: bool,
    pub message: String,
}

/// Resolved configuration with the API key reduced to presence.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub environment: String,
    pub base_url: String,
    pub ws_url: String,
    pub timeout_secs: u64,
    pub api_key: String,
    pub cache_expiry_ms: u64,
    pub debug: bool,
}

impl From<&Config> for ConfigView {
    fn from(config: &Config) -> Self {
        let api_key = match &config.connection.api_key {
            Some(key) if !key.expose_secret().is_empty() => "<set>",
            _ => "<not set>",
        };
        Self {
            environment: config.environment.to_string(),
            base_url: config.connection.base_url.clone(),
            ws_url: config.connection.ws_url.clone(),
            timeout_secs: config.connection.timeout.as_secs(),
            api_key: api_key.to_string(),
            cache_expiry_ms: config.embed.cache_expiry.as_millis() as u64,
            debug: config.embed.debug,
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format saved connections.
    fn format_connections(&self, connections: &[Connection]) -> Result<String>;

    /// Format a connection test result.
    fn format_test_result(&self, result: &TestConnectionResult) -> Result<String>;

    /// Format the provider catalogue.
    fn format_providers(&self, providers: &[Provider]) -> Result<String>;

    /// Format the category index.
    fn format_categories(&self, categories: &ProviderCategories) -> Result<String>;

    /// Format one provider in detail.
    fn format_provider(&self, provider: &Provider) -> Result<String>;

    /// Format a page of query history.
    fn format_history(&self, page: &HistoryPageOutput) -> Result<String>;

    /// Format a natural-language query response.
    fn format_query_response(&self, response: &QueryResponse) -> Result<String>;

    /// Format backend settings.
    fn format_settings(&self, settings: &Settings) -> Result<String>;

    /// Format stored API keys.
    fn format_api_keys(&self, keys: &[ApiKey]) -> Result<String>;

    /// Format a mutation result.
    fn format_operation(&self, output: &OperationOutput) -> Result<String>;

    /// Format the resolved configuration.
    fn format_config(&self, config: &ConfigView) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
mod tests;

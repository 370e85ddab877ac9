//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Declare global connection and output options shared by every subcommand.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not resolve configuration (see `config_context` module).

use std::path::PathBuf;

use apiconn_config::Environment;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands;

#[derive(Parser)]
#[command(name = "apiconn")]
#[command(about = "API Connector - query REST APIs in natural language from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  apiconn connections list\n  apiconn query 'Get my repositories' --connection 1\n  apiconn providers search weather\n  apiconn history --search repos --page 2\n  apiconn render --file response.json --template '<b>{{result.name}}</b>'\n\nEnvironment:\n  APICONN_ENV, APICONN_BASE_URL, APICONN_API_URL, APICONN_ORIGIN, APICONN_API_KEY, APICONN_TIMEOUT\n"
)]
pub struct Cli {
    /// Base URL of the backend (e.g., http://localhost:5001)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// API key sent as a bearer credential
    #[arg(short = 'k', long, global = true)]
    pub api_key: Option<String>,

    /// Deployment environment (development, production)
    #[arg(long = "env", global = true, value_name = "ENV")]
    pub environment: Option<Environment>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Suppress all progress output (spinners).
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a natural-language query against a saved connection
    Query {
        /// The question to ask (e.g., 'Get my repositories')
        text: String,

        /// Connection id to run the query against
        #[arg(short, long)]
        connection: String,
    },

    /// List and manage API connections
    Connections {
        #[command(subcommand)]
        command: commands::connections::ConnectionsCommand,
    },

    /// Browse the provider catalogue
    Providers {
        #[command(subcommand)]
        command: commands::providers::ProvidersCommand,
    },

    /// Show query history
    History {
        /// Only entries whose query or endpoint contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Entries per page
        #[arg(long, default_value_t = apiconn_config::constants::DEFAULT_HISTORY_PAGE_SIZE)]
        per_page: usize,
    },

    /// Show and change backend settings
    Settings {
        #[command(subcommand)]
        command: commands::settings::SettingsCommand,
    },

    /// Manage stored API keys
    #[command(name = "api-keys")]
    ApiKeys {
        #[command(subcommand)]
        command: commands::api_keys::ApiKeysCommand,
    },

    /// Render a query response as embed SDK HTML
    Render {
        /// Template with {{path}} placeholders
        #[arg(short, long)]
        template: Option<String>,

        /// Read the response JSON from a file ('-' for stdin)
        #[arg(short, long, value_name = "FILE", conflicts_with = "query")]
        file: Option<PathBuf>,

        /// Run this query through the SDK client and render the result
        #[arg(short, long, required_unless_present = "file")]
        query: Option<String>,

        /// Connection id for --query
        #[arg(short, long)]
        connection: Option<String>,

        /// HTML-escape rendered values
        #[arg(long)]
        escape: bool,

        /// Prepend the default stylesheet
        #[arg(long)]
        with_styles: bool,
    },

    /// Show resolved configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },

    /// Check that the backend is reachable
    Ping,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

impl Commands {
    /// Commands that never contact the backend and so skip config resolution.
    pub fn is_offline(&self) -> bool {
        matches!(
            self,
            Commands::Completions { .. } | Commands::Render { file: Some(_), .. }
        )
    }
}

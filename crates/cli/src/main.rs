//! API Connector CLI - query REST APIs in natural language from the terminal.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run backend commands through the shared client library.
//! - Render SDK HTML from saved or live query responses.
//!
//! Does NOT handle:
//! - REST endpoint implementation (see `crates/client`).
//! - SDK caching and rendering (see `crates/embed`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing.
//! - Flags override environment variables, which override built-in defaults.
//! - Logs go to stderr; stdout carries command results only.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;
mod interactive;
mod progress;

use apiconn_client::MetricsExporter;
use apiconn_config::ConfigLoader;
use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::ConfigCommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let config_context = if cli.command.is_offline() {
        ConfigCommandContext::Offline
    } else {
        let mut loader = match ConfigLoader::new().from_env() {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to load configuration from environment: {:#}", e);
                std::process::exit(ExitCode::ValidationError.as_i32());
            }
        };

        if let Some(environment) = cli.environment.clone() {
            loader = loader.with_environment(environment);
        }
        if let Some(ref url) = cli.base_url {
            loader = loader.with_base_url(url.clone());
        }
        if let Some(ref key) = cli.api_key {
            loader = loader.with_api_key(key.clone());
        }
        if let Some(timeout_secs) = cli.timeout {
            loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
        }

        match loader.build() {
            Ok(config) => ConfigCommandContext::Real(Box::new(config), cli.metrics_bind.is_some()),
            Err(e) => {
                eprintln!("Failed to build configuration: {:#}", e);
                std::process::exit(ExitCode::ValidationError.as_i32());
            }
        }
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Build the client each command needs from the config context.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - The output format is validated before any backend call is made.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands::{self, OutputTarget};
use crate::config_context::ConfigCommandContext;

pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel: &CancellationToken,
) -> Result<()> {
    let out = OutputTarget::new(&cli.output, cli.output_file.clone(), cli.quiet)?;

    match cli.command {
        Commands::Query { text, connection } => {
            commands::query::run(config.api_client()?, &text, &connection, &out, cancel).await
        }
        Commands::Connections { command } => {
            commands::connections::run(config.api_client()?, command, &out, cancel).await
        }
        Commands::Providers { command } => {
            commands::providers::run(config.api_client()?, command, &out, cancel).await
        }
        Commands::History {
            search,
            page,
            per_page,
        } => {
            commands::history::run(
                config.api_client()?,
                search.as_deref(),
                page,
                per_page,
                &out,
                cancel,
            )
            .await
        }
        Commands::Settings { command } => {
            commands::settings::run(config.api_client()?, command, &out, cancel).await
        }
        Commands::ApiKeys { command } => {
            commands::api_keys::run(config.api_client()?, command, &out, cancel).await
        }
        Commands::Render {
            template,
            file,
            query,
            connection,
            escape,
            with_styles,
        } => {
            let source = match (file, query) {
                (Some(path), _) => commands::render::RenderSource::File(path),
                (None, Some(text)) => commands::render::RenderSource::Query { text, connection },
                (None, None) => anyhow::bail!("render needs --file or --query"),
            };
            let args = commands::render::RenderArgs {
                source,
                template,
                escape,
                with_styles,
            };
            commands::render::run(config, args, &out, cancel).await
        }
        Commands::Config { command } => {
            let config = config.into_real_config()?;
            commands::config::run(&config, command, &out)
        }
        Commands::Ping => commands::ping::run(config.api_client()?, &out, cancel).await,
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

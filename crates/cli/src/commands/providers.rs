//! Providers command implementation.
//!
//! Responsibilities:
//! - List the provider catalogue, by category or filtered locally.
//! - Show the category index, server-side search results, and one provider.
//! - Suggest example queries for a connection URL.
//!
//! Does NOT handle:
//! - Creating connections from a provider (see `connections add`).

use anyhow::Result;
use apiconn_client::ApiClient;
use apiconn_client::views::{example_queries_for, filter_providers, popular_providers};
use clap::Subcommand;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::progress::Spinner;

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// List providers (default)
    List {
        /// Only providers in this category (filtered by the backend)
        #[arg(short, long)]
        category: Option<String>,
        /// Only providers whose name or description contains this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Only the popular connection templates
        #[arg(long)]
        popular: bool,
    },
    /// List categories and their providers
    Categories,
    /// Search providers by name or description (backend search)
    Search {
        /// Search term
        term: String,
    },
    /// Show details for one provider
    Show {
        /// Provider key (e.g., github)
        key: String,
    },
    /// Suggest example queries for a connection base URL
    Examples {
        /// Connection base URL (e.g., https://api.github.com)
        #[arg(id = "upstream_url", value_name = "BASE_URL")]
        upstream_url: String,
    },
}

pub async fn run(
    client: ApiClient,
    command: ProvidersCommand,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        ProvidersCommand::List {
            category,
            filter,
            popular,
        } => run_list(client, category, filter, popular, out, cancel).await,
        ProvidersCommand::Categories => {
            let categories = cancel.run(client.provider_categories()).await?;
            let output = out.formatter().format_categories(&categories)?;
            out.emit(&output)
        }
        ProvidersCommand::Search { term } => {
            info!(term = %term, "Searching providers");
            let providers = cancel.run(client.search_providers(&term)).await?;
            let output = out.formatter().format_providers(&providers)?;
            out.emit(&output)
        }
        ProvidersCommand::Show { key } => {
            let provider = cancel.run(client.get_provider(&key)).await?;
            let output = out.formatter().format_provider(&provider)?;
            out.emit(&output)
        }
        ProvidersCommand::Examples { upstream_url } => {
            let providers = cancel.run(client.list_providers(None)).await?;
            let examples = example_queries_for(&upstream_url, &providers);
            let mut output = String::new();
            for example in examples {
                output.push_str(&example);
                output.push('\n');
            }
            out.emit(&output)
        }
    }
}

async fn run_list(
    client: ApiClient,
    category: Option<String>,
    filter: Option<String>,
    popular: bool,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(category = ?category, "Listing providers");

    let spinner = Spinner::new(out.progress_enabled(), "Loading providers");
    let providers = match category.as_deref() {
        Some(c) => cancel.run(client.list_providers(Some(c))).await?,
        None => cancel.run(client.list_providers_with_categories()).await?,
    };
    spinner.finish();

    let selected: Vec<_> = if popular {
        popular_providers(&providers).into_iter().cloned().collect()
    } else {
        filter_providers(&providers, filter.as_deref().unwrap_or(""), None)
            .into_iter()
            .cloned()
            .collect()
    };

    let output = out.formatter().format_providers(&selected)?;
    out.emit(&output)
}

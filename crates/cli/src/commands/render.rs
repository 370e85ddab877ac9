//! Render command implementation.
//!
//! Responsibilities:
//! - Turn a query response into the HTML the embed SDK would place on a page.
//! - Read the response from a file or stdin, or fetch it through the SDK client.
//!
//! Does NOT handle:
//! - Table/JSON/CSV output; the result is always HTML.
//!
//! Invariants:
//! - Values are HTML-escaped only with `--escape`.
//! - A failed SDK query prints the SDK error block and exits non-zero.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apiconn_client::ResourceId;
use apiconn_embed::styles::style_tag;
use apiconn_embed::{QueryOptions, RenderOptions, render_data, render_error};
use serde_json::Value;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::config_context::ConfigCommandContext;
use crate::formatters::write_to_file;

/// Where the response to render comes from.
pub enum RenderSource {
    File(PathBuf),
    Query {
        text: String,
        connection: Option<String>,
    },
}

pub struct RenderArgs {
    pub source: RenderSource,
    pub template: Option<String>,
    pub escape: bool,
    pub with_styles: bool,
}

pub async fn run(
    ctx: ConfigCommandContext,
    args: RenderArgs,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    let options = if args.escape {
        RenderOptions::escaped()
    } else {
        RenderOptions::default()
    };

    let (body, failure) = match args.source {
        RenderSource::File(path) => {
            let data = read_response(&path)?;
            (render_data(&data, args.template.as_deref(), &options), None)
        }
        RenderSource::Query { text, connection } => {
            let client = ctx.embed_client()?;
            let query_options = QueryOptions {
                connection_id: connection
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(ResourceId::from),
                skip_cache: false,
            };
            info!(connection_id = ?query_options.connection_id, "Rendering SDK query");
            match cancel.run(client.query(&text, &query_options)).await {
                Ok(data) => (render_data(&data, args.template.as_deref(), &options), None),
                Err(e) if e.is::<crate::cancellation::Cancelled>() => return Err(e),
                Err(e) => (render_error(&format!("{e:#}"), &options), Some(e)),
            }
        }
    };

    let html = if args.with_styles {
        format!("{}\n{}", style_tag(), body)
    } else {
        body
    };

    match &out.file {
        Some(path) => {
            write_to_file(&html, path)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            eprintln!("Results written to {}", path.display());
        }
        None => println!("{}", html),
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn read_response(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read response from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Response is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_response_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        std::fs::write(&path, r#"{"result": [1, 2]}"#).unwrap();
        let value = read_response(&path).unwrap();
        assert_eq!(value["result"][1], 2);
    }

    #[test]
    fn test_read_response_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(read_response(&path).is_err());
    }
}

//! CLI command implementations.
//!
//! Every backend command takes a ready client, the `OutputTarget`, and the
//! cancellation token, and races its backend calls against the token.

pub mod api_keys;
pub mod completions;
pub mod config;
pub mod connections;
pub mod history;
pub mod ping;
pub mod providers;
pub mod query;
pub mod render;
pub mod settings;

use std::path::PathBuf;

use anyhow::Result;

use crate::formatters::{Formatter, OutputFormat, get_formatter, output_result};

/// Where and how command results are written.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
    pub quiet: bool,
}

impl OutputTarget {
    pub fn new(format: &str, file: Option<PathBuf>, quiet: bool) -> Result<Self> {
        Ok(Self {
            format: format.parse()?,
            file,
            quiet,
        })
    }

    pub fn formatter(&self) -> Box<dyn Formatter> {
        get_formatter(self.format)
    }

    /// Write `output` to the file or stdout.
    pub fn emit(&self, output: &str) -> Result<()> {
        output_result(output, self.format, self.file.as_ref())
    }

    /// Spinners are shown unless `--quiet`.
    pub fn progress_enabled(&self) -> bool {
        !self.quiet
    }
}

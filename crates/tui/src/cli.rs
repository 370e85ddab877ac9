//! Command-line arguments for apiconn-tui.
//!
//! Precedence (highest to lowest): CLI arguments, environment variables
//! (including `.env`), built-in defaults.

use apiconn_config::Environment;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "apiconn-tui",
    about = "Terminal dashboard for the natural-language API connector",
    version,
    after_help = "Examples:\n  apiconn-tui\n  apiconn-tui --base-url http://localhost:5001\n  apiconn-tui --log-dir /var/log/apiconn --no-mouse\n  apiconn-tui --fresh\n"
)]
pub struct Cli {
    /// Deployment environment (development, staging, production)
    #[arg(long, short = 'e')]
    pub environment: Option<Environment>,

    /// Backend base URL, overriding the environment's default
    #[arg(long)]
    pub base_url: Option<String>,

    /// Key sent as a bearer credential to the backend
    #[arg(long, env = "APICONN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable mouse support
    #[arg(long)]
    pub no_mouse: bool,

    /// Start with fresh state, ignoring any persisted preferences
    #[arg(long)]
    pub fresh: bool,

    /// Enable Prometheus metrics endpoint and bind address (e.g., "localhost:9090")
    #[arg(long, env = "APICONN_METRICS_BIND")]
    pub metrics_bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("APICONN_API_KEY", None::<&str>),
                ("APICONN_METRICS_BIND", None),
            ],
            || {
                let cli = Cli::parse_from(["apiconn-tui"]);
                assert_eq!(cli.log_dir, PathBuf::from("logs"));
                assert!(!cli.no_mouse);
                assert!(!cli.fresh);
                assert!(cli.base_url.is_none());
                assert!(cli.api_key.is_none());
                assert!(cli.metrics_bind.is_none());
            },
        );
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "apiconn-tui",
            "-e",
            "development",
            "--base-url",
            "http://localhost:9000",
            "--no-mouse",
            "--fresh",
        ]);
        assert_eq!(cli.environment, Some(Environment::Development));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(cli.no_mouse);
        assert!(cli.fresh);
    }

    #[test]
    fn test_api_key_from_env() {
        temp_env::with_var("APICONN_API_KEY", Some("from-env"), || {
            let cli = Cli::parse_from(["apiconn-tui"]);
            assert_eq!(cli.api_key.as_deref(), Some("from-env"));
        });
    }
}

//! apiconn-tui: terminal dashboard for the natural-language API connector.
//!
//! Responsibilities:
//! - Initialize logging, metrics, configuration and the terminal.
//! - Run the main event loop.
//!
//! Does NOT handle:
//! - HTTP calls or wire formats (see `apiconn_client`).
//! - Async API calls (see `runtime::side_effects`).
//!
//! Invariants:
//! - `load_dotenv()` runs before configuration is read.
//! - The terminal is restored on every exit path, panics included.
//! - Every action passes through `App::update`; follow-ups it returns are
//!   fed back until none remain.

use std::sync::Arc;

use anyhow::Result;
use apiconn_client::{MetricsCollector, MetricsExporter};
use apiconn_config::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_UI_TICK_MS};
use apiconn_config::{ConfigManager, PersistedState};
use apiconn_tui::action::{Action, RedactedAction};
use apiconn_tui::app::App;
use apiconn_tui::cli::Cli;
use apiconn_tui::runtime::{
    client::create_client,
    config::{load_config, save_and_quit},
    side_effects::{TaskTracker, handle_side_effects},
    terminal::TerminalGuard,
};
use clap::Parser;
use crossterm::{
    event::{EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::{Mutex, mpsc::channel};
use tracing_appender::non_blocking;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const AUTO_SAVE_INTERVAL_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let no_mouse = cli.no_mouse;

    std::fs::create_dir_all(&cli.log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "apiconn-tui.log");
    // `_guard` flushes buffered log lines when main returns.
    let (non_blocking, _guard) = non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind_addr);
                Some(exporter)
            }
            Err(e) => {
                tracing::error!("Failed to start metrics exporter: {}", e);
                None
            }
        }
    } else {
        None
    };
    let metrics = if _metrics_exporter.is_some() {
        MetricsCollector::new()
    } else {
        MetricsCollector::disabled()
    };

    let config = load_config(&cli)?;
    tracing::info!(
        environment = %config.environment,
        base_url = %config.connection.base_url,
        "Configuration loaded"
    );
    let client = Arc::new(create_client(&config, metrics.clone())?);

    let config_manager = ConfigManager::new()?;
    let persisted = if cli.fresh {
        tracing::info!("--fresh flag set, starting with default state");
        PersistedState::default()
    } else {
        config_manager.load()
    };
    let config_manager = Arc::new(Mutex::new(config_manager));

    let mut app = App::new(config.connection.base_url.clone(), persisted);
    let task_tracker = TaskTracker::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if no_mouse {
        execute!(stdout, EnterAlternateScreen)?;
    } else {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let _terminal_guard = TerminalGuard::new(no_mouse);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = channel::<Action>(DEFAULT_CHANNEL_CAPACITY);

    // Key presses are never dropped; the send waits for channel space.
    let tx_input = tx.clone();
    task_tracker.spawn(async move {
        let mut reader = EventStream::new();
        while let Some(event_result) = reader.next().await {
            let Ok(event) = event_result else {
                break;
            };
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
                && tx_input.send(Action::Input(key)).await.is_err()
            {
                break;
            }
        }
    });

    let _ = tx.send(Action::LoadDashboard).await;

    let mut tick_interval =
        tokio::time::interval(tokio::time::Duration::from_millis(DEFAULT_UI_TICK_MS));
    let mut auto_save_interval =
        tokio::time::interval(tokio::time::Duration::from_secs(AUTO_SAVE_INTERVAL_SECS));

    'event_loop: loop {
        terminal.draw(|f| app.render(f))?;

        tokio::select! {
            Some(action) = rx.recv() => {
                metrics.record_tui_action_queue_depth(rx.len());

                let mut pending = Some(action);
                while let Some(action) = pending.take() {
                    tracing::info!("Handling action: {:?}", RedactedAction(&action));

                    if matches!(action, Action::Quit) {
                        if let Err(e) = save_and_quit(&app, &config_manager).await {
                            tracing::error!(error = %e, "Failed to save preferences");
                        }
                        break 'event_loop;
                    }

                    pending = app.update(action.clone());
                    handle_side_effects(
                        action,
                        client.clone(),
                        tx.clone(),
                        config_manager.clone(),
                        task_tracker.clone(),
                    )
                    .await;
                }
            }
            _ = tick_interval.tick() => {
                app.update(Action::Tick);
            }
            _ = auto_save_interval.tick() => {
                let state = app.persisted_state();
                let cm = config_manager.clone();
                task_tracker.spawn(async move {
                    let manager = cm.lock().await;
                    if let Err(e) = manager.save(&state) {
                        tracing::error!(error = %e, "Failed to auto-save preferences");
                    }
                });
            }
        }
    }

    // The input reader blocks on the terminal; stop waiting once other
    // tasks settle.
    task_tracker.close();
    let _ = tokio::time::timeout(tokio::time::Duration::from_secs(2), task_tracker.wait()).await;

    drop(terminal);
    drop(_terminal_guard);
    Ok(())
}

//! `sentinel-tui`: terminal dashboard for Star Deception server status.
//!
//! Built on [ratatui](https://ratatui.rs) over the `sentinel-core`
//! [`Dashboard`](sentinel_core::Dashboard) controller. `v` switches
//! between servers and players, `l` between grid and list, `s` opens the
//! settings form where the upstream base URL and refresh rate are set.
//!
//! Logs are written to a file (default `/tmp/sentinel-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge forwards every
//! controller state change into the TUI action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sentinel_core::{Dashboard, SdoClient};

use crate::app::App;

/// Terminal dashboard for Star Deception game servers and players.
#[derive(Parser, Debug)]
#[command(name = "sentinel-tui", version, about)]
struct Cli {
    /// Upstream base URL (e.g., http://sdo.stardeception.space)
    #[arg(short = 'u', long, env = "SENTINEL_BASE_URL")]
    url: Option<String>,

    /// Seconds between automatic refreshes
    #[arg(short = 'r', long)]
    refresh: Option<u32>,

    /// Path to an alternate config file
    #[arg(long, env = "SENTINEL_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/sentinel-tui.log)
    #[arg(long, default_value = "/tmp/sentinel-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Logging to stdout/stderr would corrupt the
/// TUI output. The returned guard must live until exit so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("sentinel_tui={log_level},sentinel_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("sentinel-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Merge the config file with CLI overrides.
fn load_settings(cli: &Cli) -> Result<sentinel_config::DashboardSettings> {
    let cfg = match cli.config {
        Some(ref path) => sentinel_config::load_config_from(path),
        None => sentinel_config::load_config(),
    }
    .wrap_err("failed to load configuration")?;

    let mut settings = cfg.dashboard;
    if let Some(ref url) = cli.url {
        settings.base_url.clone_from(url);
    }
    if let Some(refresh) = cli.refresh {
        settings.refresh_interval_secs = refresh;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let settings = load_settings(&cli)?;
    let config = settings.to_configuration()?;
    let client = SdoClient::new(&settings.transport())?;
    let width = tui::viewport_width();

    info!(
        base_url = config.base_url(),
        refresh_secs = config.refresh_interval_secs(),
        viewport_width = width,
        "starting sentinel-tui"
    );

    let dashboard = Dashboard::new(client, config, width);
    let mut app = App::new(dashboard);
    app.run().await?;

    Ok(())
}

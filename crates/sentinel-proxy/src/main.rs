use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentinel_api::SdoClient;
use sentinel_proxy::{AppState, StartupError};

/// Star Deception Sentinel: backend proxy for the SDO status API.
#[derive(Debug, Parser)]
#[command(name = "sentinel-proxy", version, about, long_about = None)]
struct Cli {
    /// Port to listen on [default: config file, then 3000]
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind [default: config file, then 0.0.0.0]
    #[arg(long)]
    bind: Option<String>,

    /// Path to an alternate config file
    #[arg(long, env = "SENTINEL_CONFIG")]
    config: Option<PathBuf>,

    /// Players upstream URL override
    #[arg(long)]
    players_upstream: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let cfg = match cli.config {
        Some(ref path) => sentinel_config::load_config_from(path)?,
        None => sentinel_config::load_config()?,
    };
    let mut settings = cfg.proxy;
    if let Some(upstream) = cli.players_upstream {
        settings.players_upstream = upstream;
    }
    settings.validate()?;

    let port = cli.port.unwrap_or(settings.port);
    let bind = cli.bind.unwrap_or_else(|| settings.bind.clone());
    let addr = format!("{bind}:{port}");

    let client = SdoClient::new(&settings.transport())?;
    let state = AppState::new(client, settings.players_upstream.as_str());

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(
        port,
        players_upstream = %settings.players_upstream,
        "Star Deception - Sentinel proxy started"
    );

    sentinel_proxy::serve(listener, state)
        .await
        .map_err(StartupError::Serve)
}

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tubegate_server::{AppState, ServiceConfig, init_observability, serve};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tokenized media download service", long_about = None)]
struct Args {
    /// Configuration file (default: ./tubegate.toml if present)
    #[arg(short, long, env = "TUBEGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overriding [server].host
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding [server].port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading configuration
    let dotenv = dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_observability(&config.log)?;
    if let Some(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let state = AppState::from_config(&config)?;
    serve(&config, state).await?;
    Ok(())
}

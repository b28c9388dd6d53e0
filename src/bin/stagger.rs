//! # stagger
//!
//! Serves the repository model over HTTP until interrupted.
//!
//! ```text
//! stagger --config stagger.json --port 9090 --seed data/model.json
//! ```
//!
//! Command-line flags override values read from the config file.

use anyhow::Context;
use clap::Parser;
use stagger::{run_server, InMemoryModel, ServerConfig, SharedModel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagger")]
#[command(about = "Repository, branch, tag and artifact metadata over HTTP")]
struct Cli {
    /// JSON config file. Missing files fall back to defaults.
    #[arg(short, long, default_value = "stagger.json")]
    config: PathBuf,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// JSON snapshot to load at start-up
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::load(&cli.config)
        .await
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.seed.is_some() {
        config.seed_path = cli.seed;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let model: SharedModel = match &config.seed_path {
        Some(path) => Arc::new(
            InMemoryModel::load(path)
                .await
                .with_context(|| format!("seeding model from {}", path.display()))?,
        ),
        None => Arc::new(InMemoryModel::new()),
    };

    run_server(config, model).await?;
    Ok(())
}

//! `asset-tools` — offline content-pipeline utilities.
//!
//! One binary, one subcommand per tool. Nothing here runs as a service;
//! each invocation does its work and exits.

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "asset_tools=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = cli::Cli::parse();
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

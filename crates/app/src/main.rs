//! Lexicon binary.

use anyhow::Context;
use clap::Parser;
use lexicon::{Cli, LexiconConfig, commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = LexiconConfig::load(cli.config.as_deref()).context("loading configuration")?;

    tracing::info!("Lexicon v{}", env!("CARGO_PKG_VERSION"));
    commands::run(cli.command, &config).await
}

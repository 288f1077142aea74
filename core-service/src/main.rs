//! gabbar CLI - prints one JSON prediction for a changeset

use anyhow::Context;
use clap::Parser;

use gabbar::constants::{APP_NAME, APP_VERSION};
use gabbar::{Config, Gabbar};

#[derive(Debug, Parser)]
#[command(name = "gabbar", version, about = "Guarding OSM from invalid or suspicious edits")]
struct Cli {
    /// Changeset identifier
    changeset_id: String,
}

fn main() -> anyhow::Result<()> {
    // .env first so RUST_LOG from it reaches the logger
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from_env();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);
    log::debug!("Config: {:?}", config);

    let gabbar = Gabbar::new(config).context("failed to load classifier")?;
    let report = gabbar
        .report(&cli.changeset_id)
        .with_context(|| format!("failed to classify changeset {}", cli.changeset_id))?;

    println!("{}", report.to_json().context("failed to encode report")?);
    Ok(())
}

mod config;
mod models;
mod pipeline;
mod scraper;
mod server;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::pipeline::profile::SourceProfile;
use crate::scraper::InvestorgainScraper;

#[derive(Parser)]
#[command(name = "ipo-gmp-service", about = "IPO grey-market premium extraction service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server exposing the listing endpoints
    Serve,

    /// Fetch currently open listings once and print the envelope JSON
    Open,

    /// Fetch upcoming listings once and print the envelope JSON
    Upcoming,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "ipo_gmp_service=info,warn",
        1 => "ipo_gmp_service=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve => server::run(config).await?,
        Command::Open => fetch_once(&config, SourceProfile::MainboardLive).await?,
        Command::Upcoming => fetch_once(&config, SourceProfile::MainboardUpcoming).await?,
    }

    Ok(())
}

async fn fetch_once(config: &AppConfig, profile: SourceProfile) -> Result<()> {
    let _t = utils::Timer::start(format!("{profile} fetch"));

    let scraper = InvestorgainScraper::new(&config.scraper)?;
    let outcome = pipeline::fetch_listings(&scraper, profile).await;

    println!("{}", serde_json::to_string_pretty(&outcome.envelope)?);

    info!(
        "{}: {} records ({} rows scanned, {} field misses)",
        profile,
        outcome.envelope.ipo_data.len(),
        outcome.stats.rows_seen,
        outcome.stats.field_misses,
    );

    Ok(())
}

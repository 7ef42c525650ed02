//! # Forex Sync Application
//!
//! Binary that wires together all the components:
//! - Load configuration from flags and environment
//! - Open the SQLite rate store and load the currency catalog
//! - Run one immediate refresh
//! - Spawn the daily midnight scheduler
//! - Hand the foreground to the interactive console loop

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forex_core::{ForexService, catalog, inbound, scheduler};
use forex_provider::HttpRateSource;
use forex_repo::SqliteStore;

/// Daily forex-rate sync with an interactive console.
#[derive(Parser)]
#[command(name = "forex-sync", version, about, long_about = None)]
struct Cli {
    /// Base URL of the rate provider
    #[arg(long, env = "FOREX_PROVIDER_URL", default_value = HttpRateSource::DEFAULT_BASE_URL)]
    provider_url: String,

    /// Rate provider API key
    #[arg(long, env = "API_KEY")]
    api_key: String,

    /// SQLite database URL
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://forex_data.db?mode=rwc"
    )]
    database_url: String,

    /// Path to the reference currency CSV
    #[arg(long, env = "CURRENCIES_CSV", default_value = "currencies.csv")]
    catalog: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,forex_app=debug,forex_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting forex sync");
    tracing::info!("Using database: {}", cli.database_url);

    // Both of these are fatal: there is no meaningful mode without a store
    // and a catalog.
    let store = SqliteStore::new(&cli.database_url).await?;
    let catalog = Arc::new(catalog::load_catalog(&cli.catalog)?);
    tracing::info!(
        currencies = catalog.len(),
        path = %cli.catalog.display(),
        "currency catalog loaded"
    );

    let provider = HttpRateSource::new(cli.provider_url, cli.api_key);
    let service = Arc::new(ForexService::new(provider, store, catalog));

    // Initial population; a failed fetch is reported but not fatal.
    tracing::info!("fetching latest rates for initial population");
    match service.refresh().await {
        Ok(report) => tracing::info!(%report, "initial refresh applied"),
        Err(e) => tracing::error!(error = %e, "initial refresh failed"),
    }

    tokio::spawn(scheduler::run(service.clone()));

    inbound::run(service.clone()).await?;

    // Release the store handle before exiting.
    service.store().close().await;
    Ok(())
}

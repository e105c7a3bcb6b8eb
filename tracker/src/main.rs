//! # Token Tracker
//!
//! Loads a seed token list, keeps it refreshed against DexScreener and logs
//! the ranked view after every refresh.

mod args;
mod view;

use anyhow::Context;
use args::{Args, Command};
use clap::Parser;
use lib_core::config::{core_config, install_config, Config};
use lib_core::model::MarketMetrics;
use lib_core::{load_seed, search_tokens, SortKey, TokenRecord};
use lib_market::holders::HolderStats;
use lib_market::{
    BatchConfig, CollectionUpdate, DexScreenerClient, DiscoveryClient, HolderClient,
    PortfolioClient, RefreshLoop, TokenCollection,
};
use lib_utils::{format_clock, now_utc};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing();

    info!("Loading configuration...");
    let mut config = Config::from_env()?;
    if let Some(seed) = &args.seed {
        config.seed_path = Some(seed.clone());
    }
    config.validate()?;
    install_config(config)?;
    let config = core_config();

    match &args.command {
        Some(Command::Holders { mint, limit }) => show_holders(config, mint, *limit).await,
        Some(Command::Portfolio { wallet }) => show_portfolio(config, wallet).await,
        Some(Command::Discover) => discover(config, &args).await,
        None => watch(config, &args).await,
    }
}

fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(log_level.as_str())
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Seed records from the configured file, falling back to discovery.
async fn load_records(config: &Config) -> anyhow::Result<Vec<TokenRecord>> {
    if let Some(path) = &config.seed_path {
        return Ok(load_seed(path)?);
    }

    if let Some(discovery) = DiscoveryClient::from_config(config)? {
        return Ok(discovery.fetch_tokens().await);
    }

    anyhow::bail!("No token source: pass --seed, or set SEED_PATH or DISCOVERY_API_URL")
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        info!("{}", line);
    }
}

async fn watch(config: &Config, args: &Args) -> anyhow::Result<()> {
    if args.sort.parse::<SortKey>().is_err() {
        warn!("Unknown sort key {:?}, keeping list order", args.sort);
    }

    if let Some(path) = &args.metrics {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metrics {}", path.display()))?;
        let metrics: MarketMetrics = serde_json::from_str(&body)?;
        print_lines(view::render_metrics(&metrics));
    }

    let records = load_records(config).await?;
    if records.is_empty() {
        warn!("Token list is empty, nothing to track");
        return Ok(());
    }

    let collection = TokenCollection::new(records);
    for mint in &args.watch {
        if !collection.set_watch(mint, true).await {
            warn!("Not tracking {}, cannot watch it", mint);
        }
    }

    let mut updates = collection.subscribe();
    let source = Arc::new(DexScreenerClient::from_config(config)?);
    let handle = RefreshLoop::spawn(
        source,
        collection.clone(),
        config.refresh_interval(),
        BatchConfig::from_config(config),
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            update = updates.recv() => {
                match update {
                    Ok(CollectionUpdate::Refreshed { len }) => {
                        let snapshot = collection.snapshot().await;
                        let shown: Vec<TokenRecord> = match &args.search {
                            Some(query) => search_tokens(&snapshot, query).into_iter().cloned().collect(),
                            None => snapshot,
                        };
                        info!("{} tokens refreshed at {}", len, format_clock(now_utc()));
                        print_lines(view::render_table(&shown, &args.sort, args.top));
                        if args.once {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => warn!("Skipped {} collection updates", skipped),
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    handle.cancel();
    Ok(())
}

async fn show_holders(config: &Config, mint: &str, limit: usize) -> anyhow::Result<()> {
    let client = HolderClient::from_config(config)?;
    let page = client.top_holders(mint, limit).await?;

    // Holder count comes from the tracked record when there is one
    let total_holders = match config.seed_path {
        Some(_) => load_records(config)
            .await?
            .iter()
            .find(|r| r.normalized_id() == lib_core::normalize_id(mint))
            .map(|r| r.tokenomics.holder)
            .unwrap_or(0),
        None => 0,
    };

    let stats = HolderStats::from_page(&page, total_holders);
    print_lines(view::render_holders(&page, &stats));
    Ok(())
}

async fn show_portfolio(config: &Config, wallet: &str) -> anyhow::Result<()> {
    let records = load_records(config).await?;
    let client = PortfolioClient::from_config(config)?;
    let summary = client.portfolio(wallet, &records).await?;
    print_lines(view::render_portfolio(&summary));
    Ok(())
}

async fn discover(config: &Config, args: &Args) -> anyhow::Result<()> {
    let client = DiscoveryClient::from_config(config)?
        .context("DISCOVERY_API_URL must be set for discover")?;
    let records = client.fetch_tokens().await;
    print_lines(view::render_table(&records, &args.sort, args.top));
    Ok(())
}

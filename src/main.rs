//! Stock ticker: cached daily closing prices over HTTP.
//!
//! Single-binary Tokio application that:
//! 1. Loads configuration from env / .env / config.toml
//! 2. Fetches daily closes from Alpha Vantage on cache miss
//! 3. Serves the newest N closes and their average on `GET /stocks`
//! 4. Sweeps expired cache entries in the background

mod config;
mod server;

use std::{sync::Arc, time::Duration};

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use alphavantage_client::AlphaVantageClient;
use common::{Error, TickerConfig};
use ticker_service::{new_series_cache, spawn_sweeper, SeriesCache, StockService};

/// Stock ticker HTTP service
#[derive(Parser)]
#[command(name = "stock-ticker", about = "Cached daily stock closes over HTTP")]
struct Cli {
    /// Fetch the series once, print it as JSON, then exit.
    #[arg(long)]
    once: bool,
}

fn build_service(cfg: &TickerConfig, cache: SeriesCache) -> Result<StockService, Error> {
    let days = usize::try_from(cfg.n_days)
        .map_err(|_| Error::Config(format!("n_days out of range: {}", cfg.n_days)))?;
    let client = AlphaVantageClient::new(
        cfg.api_key.clone(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?;

    Ok(StockService::new(
        cfg.symbol.clone(),
        days,
        Duration::from_secs(cfg.cache.ttl_secs),
        Arc::new(client),
        cache,
    ))
}

async fn run_once(service: &StockService) -> Result<(), Error> {
    let series = service.get_stock_data().await?;
    println!("{}", serde_json::to_string_pretty(series.as_ref())?);
    Ok(())
}

#[cfg(unix)]
async fn terminate_signal() {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut sig) => {
            sig.recv().await;
        }
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await;
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stock_ticker=info,alphavantage_client=info,ticker_service=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    // Load configuration.
    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: symbol={} n_days={} port={} cache_ttl={}s cleanup={}s timeout={}s",
        cfg.symbol,
        cfg.n_days,
        cfg.port,
        cfg.cache.ttl_secs,
        cfg.cache.cleanup_interval_secs,
        cfg.request_timeout_secs,
    );

    let cache = new_series_cache();
    let service = match build_service(&cfg, cache.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to initialize stock service: {}", e);
            std::process::exit(1);
        }
    };

    if cli.once {
        if let Err(e) = run_once(&service).await {
            error!("Error getting stock data: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // ── Background tasks ─────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = spawn_sweeper(
        cache,
        Duration::from_secs(cfg.cache.cleanup_interval_secs),
        shutdown_rx.clone(),
    );

    let mut server_handle = tokio::spawn(server::serve(service.clone(), cfg.port, shutdown_rx));

    // ── Wait for shutdown ────────────────────────────────────────────
    info!("Stock ticker is running. Press Ctrl+C to stop.");

    let mut server_done = false;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received (ctrl_c)");
        }
        _ = terminate_signal() => {
            info!("Shutdown signal received (SIGTERM)");
        }
        r = &mut server_handle => {
            server_done = true;
            match r {
                Ok(Ok(())) => info!("HTTP server exited"),
                Ok(Err(e)) => error!("HTTP server failed: {}", e),
                Err(e) => error!("HTTP server task panicked: {}", e),
            }
        }
    }

    let _ = shutdown_tx.send(true);

    if !server_done {
        match server_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("HTTP server failed during shutdown: {}", e),
            Err(e) => error!("HTTP server task panicked: {}", e),
        }
    }
    if let Err(e) = sweeper_handle.await {
        error!("Cache sweeper task panicked: {}", e);
    }

    info!("Shutdown complete");
}

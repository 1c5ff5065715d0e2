//! USD-BRL quote relay server binary.
//!
//! Prepares the SQLite schema, wires `HttpQuoteSource` and `SqliteQuoteStore`
//! into a `QuoteOrchestrator`, and serves `GET /cotacao` until Ctrl+C.
//! Per-request failures are logged and the server keeps serving; only start-up
//! failures stop the process.
#![warn(missing_docs)]
mod args;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use quote_relay_common::RelayConfig;
use quote_relay_server::http::{create_router, serve};
use quote_relay_server::source::HttpQuoteSource;
use quote_relay_server::store::SqliteQuoteStore;
use quote_relay_server::{QuoteOrchestrator, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();
    let config = Args::parse().into_config();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: RelayConfig) -> Result<()> {
    config.validate()?;

    let store = SqliteQuoteStore::new(&config.store_location, config.persist_timeout);
    store.ensure_schema().await?;
    info!("Quote store ready at {}", store.path().display());

    let source = HttpQuoteSource::new(&config.upstream_url, config.fetch_timeout)?;
    let shutdown = CancellationToken::new();
    let orchestrator = QuoteOrchestrator::new(
        Arc::new(source),
        Arc::new(store),
        &config,
        shutdown.clone(),
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "Relay started: upstream={} fetch={:?} persist={:?} ({})",
        config.upstream_url, config.fetch_timeout, config.persist_timeout, config.persist_mode
    );

    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C received. Shutting down server..."),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                return;
            }
        }
        signal.cancel();
    });

    serve(listener, create_router(Arc::new(orchestrator)), shutdown).await?;
    info!("Server stopped");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

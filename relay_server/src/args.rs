//! Command-line arguments for the relay server.
//!
//! This module defines the CLI interface using `clap`. Every flag also reads a
//! `RELAY_*` environment variable and falls back to the shipped defaults.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quote_relay_common::net::{DEFAULT_BIND_ADDR, DEFAULT_STORE_LOCATION, DEFAULT_UPSTREAM_URL};
use quote_relay_common::config::{FETCH_TIMEOUT, PERSIST_TIMEOUT};
use quote_relay_common::{PersistMode, RelayConfig};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on.
    #[clap(long, env = "RELAY_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// Upstream endpoint returning `{"USDBRL": {"bid": ...}}`.
    #[clap(long, env = "RELAY_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// SQLite file quotes are appended to.
    #[clap(long, env = "RELAY_STORE_LOCATION", default_value = DEFAULT_STORE_LOCATION)]
    pub store_location: PathBuf,

    /// Upstream fetch budget in milliseconds.
    #[clap(long, env = "RELAY_FETCH_TIMEOUT_MS", default_value_t = FETCH_TIMEOUT.as_millis() as u64)]
    pub fetch_timeout_ms: u64,

    /// Persistence budget in milliseconds.
    #[clap(long, env = "RELAY_PERSIST_TIMEOUT_MS", default_value_t = PERSIST_TIMEOUT.as_millis() as u64)]
    pub persist_timeout_ms: u64,

    /// Whether the persistence attempt is awaited (inline) or spawned (detached).
    #[clap(long, env = "RELAY_PERSIST_MODE", value_enum, default_value_t = PersistMode::Inline)]
    pub persist_mode: PersistMode,
}

impl Args {
    /// Overlay the arguments on the default configuration.
    pub fn into_config(self) -> RelayConfig {
        RelayConfig {
            bind_addr: self.bind_addr,
            upstream_url: self.upstream_url,
            store_location: self.store_location,
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            persist_timeout: Duration::from_millis(self.persist_timeout_ms),
            persist_mode: self.persist_mode,
            ..RelayConfig::default()
        }
    }
}

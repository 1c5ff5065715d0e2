//! Command-line arguments for the relay client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quote_relay_common::RelayConfig;
use quote_relay_common::config::CLIENT_TIMEOUT;
use quote_relay_common::net::{DEFAULT_ARTIFACT_PATH, DEFAULT_SERVER_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Relay endpoint to request.
    #[clap(long, env = "RELAY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// File overwritten with the received bid.
    #[clap(long, env = "RELAY_ARTIFACT_PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub output: String,

    /// Deadline for the whole request in milliseconds.
    #[clap(long, env = "RELAY_CLIENT_TIMEOUT_MS", default_value_t = CLIENT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,
}

impl Args {
    /// Overlay the arguments on the default configuration.
    pub fn into_config(self) -> RelayConfig {
        RelayConfig {
            server_url: self.server_url.trim().to_string(),
            artifact_path: normalize_path(&self.output),
            client_timeout: Duration::from_millis(self.timeout_ms),
            ..RelayConfig::default()
        }
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_relay_config() {
        let config = Args::try_parse_from(["quote_relay_client"]).unwrap().into_config();
        assert_eq!(config, RelayConfig::default());
    }

    #[test]
    fn quoted_output_path_is_unwrapped() {
        let config = Args::try_parse_from([
            "quote_relay_client",
            "--output",
            " \"C:\\quotes\\cotacao.txt\" ",
            "--timeout-ms",
            "150",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.artifact_path, PathBuf::from("C:\\quotes\\cotacao.txt"));
        assert_eq!(config.client_timeout, Duration::from_millis(150));
    }
}

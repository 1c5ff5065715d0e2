//! Relay configuration shared by the server and client binaries.
//!
//! Every timeout, URL and file location lives in `RelayConfig` and is handed to
//! each component at construction. `RelayConfig::default()` carries the fixed
//! values the relay ships with; the binaries let a few be overridden from the
//! command line before calling [`RelayConfig::validate`].
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use strum::{Display, EnumString};

use crate::error::ConfigError;
use crate::net::{
    DEFAULT_ARTIFACT_PATH, DEFAULT_BIND_ADDR, DEFAULT_SERVER_URL, DEFAULT_STORE_LOCATION,
    DEFAULT_UPSTREAM_URL,
};
use crate::result::Result;

/// Server-to-upstream budget.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(200);
/// Server-to-datastore budget.
pub const PERSIST_TIMEOUT: Duration = Duration::from_millis(10);
/// Client-to-server budget, covering the whole exchange.
pub const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);

/// How the server runs the persistence attempt relative to the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PersistMode {
    /// Await the bounded write before answering; ignore its outcome.
    #[default]
    Inline,
    /// Spawn the bounded write and answer immediately.
    Detached,
}

/// Full set of relay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Ceiling for one upstream fetch.
    pub fetch_timeout: Duration,
    /// Ceiling for one persistence attempt.
    pub persist_timeout: Duration,
    /// Ceiling for the client's whole request.
    pub client_timeout: Duration,
    /// Upstream endpoint the server fetches from.
    pub upstream_url: String,
    /// SQLite database file.
    pub store_location: PathBuf,
    /// Relay URL the client requests.
    pub server_url: String,
    /// Address the server binds to.
    pub bind_addr: String,
    /// File the client overwrites on success.
    pub artifact_path: PathBuf,
    /// Inline or detached persistence.
    pub persist_mode: PersistMode,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: FETCH_TIMEOUT,
            persist_timeout: PERSIST_TIMEOUT,
            client_timeout: CLIENT_TIMEOUT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            store_location: PathBuf::from(DEFAULT_STORE_LOCATION),
            server_url: DEFAULT_SERVER_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            persist_mode: PersistMode::default(),
        }
    }
}

impl RelayConfig {
    /// Checks that timeouts are non-zero and that URLs and paths are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, timeout) in [
            ("fetch_timeout", self.fetch_timeout),
            ("persist_timeout", self.persist_timeout),
            ("client_timeout", self.client_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::ZeroTimeout(name));
            }
        }

        check_url("upstream_url", &self.upstream_url)?;
        check_url("server_url", &self.server_url)?;

        if self.bind_addr.trim().is_empty() {
            return Err(ConfigError::Empty("bind_addr"));
        }
        if self.store_location.as_os_str().is_empty() {
            return Err(ConfigError::Empty("store_location"));
        }
        if self.artifact_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty("artifact_path"));
        }
        Ok(())
    }
}

fn check_url(field: &'static str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Empty(field));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hop_budgets() {
        let config = RelayConfig::default();
        assert_eq!(config.fetch_timeout, Duration::from_millis(200));
        assert_eq!(config.persist_timeout, Duration::from_millis(10));
        assert_eq!(config.client_timeout, Duration::from_millis(300));
        assert_eq!(config.persist_mode, PersistMode::Inline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = RelayConfig {
            persist_timeout: Duration::ZERO,
            ..RelayConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("persist_timeout"))
        );
    }

    #[test]
    fn bad_urls_are_rejected() {
        let config = RelayConfig {
            upstream_url: " ".to_string(),
            ..RelayConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Empty("upstream_url")));

        let config = RelayConfig {
            server_url: "localhost:8080/cotacao".to_string(),
            ..RelayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { field: "server_url", .. })
        ));
    }

    #[test]
    fn persist_mode_parses_case_insensitively() {
        assert_eq!("Detached".parse::<PersistMode>().unwrap(), PersistMode::Detached);
        assert_eq!(PersistMode::Inline.to_string(), "inline");
    }
}

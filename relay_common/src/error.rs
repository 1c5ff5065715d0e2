//! Error types shared between client and server.
//!
//! `DecodeError` covers malformed JSON at either hop (server decoding the
//! upstream payload, client decoding the server response). `ConfigError` is
//! raised when a `RelayConfig` fails validation at start-up.
use strum::Display;
use thiserror::Error;

/// Which hop a payload was being decoded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Boundary {
    /// Server decoding the upstream API payload.
    #[strum(to_string = "upstream payload")]
    Upstream,
    /// Client decoding the relay server response.
    #[strum(to_string = "server response")]
    Server,
}

/// Malformed JSON at a decoding boundary.
#[derive(Error, Debug)]
#[error("malformed {boundary}: {source}")]
pub struct DecodeError {
    /// Hop at which decoding failed.
    pub boundary: Boundary,
    /// Underlying serde_json failure.
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    /// Wraps a serde_json failure observed at `boundary`.
    pub fn new(boundary: Boundary, source: serde_json::Error) -> Self {
        Self { boundary, source }
    }
}

/// Invalid relay configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A timeout was configured as zero.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// A URL or path setting was left empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A URL setting does not use http or https.
    #[error("{field} is not an http(s) URL: {value}")]
    InvalidUrl {
        /// Name of the offending setting.
        field: &'static str,
        /// Value as configured.
        value: String,
    },
}

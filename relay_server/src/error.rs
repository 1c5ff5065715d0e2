//! Error types used across the relay server crate.
//!
//! - `UpstreamFetchError` fails the current request (answered with a 500).
//! - `PersistenceError` is only ever logged by the orchestrator.
//! - `ServerError` covers start-up failures that stop the process.
//!
//! Deadline breaches get their own variants so log lines can tell a slow hop
//! apart from a broken one, while callers still see a single error category.
use std::io;
use std::time::Duration;

use quote_relay_common::{ConfigError, DecodeError};
use thiserror::Error;

/// Closed set of reasons an upstream fetch can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureReason {
    /// Fetch deadline exceeded.
    Timeout,
    /// Connection, protocol or status failure.
    Transport,
    /// Upstream body was not the expected JSON.
    Decode,
}

/// Failure while obtaining a quote from the upstream API.
#[derive(Error, Debug)]
pub enum UpstreamFetchError {
    /// The fetch did not complete within its deadline.
    #[error("upstream fetch exceeded its {0:?} deadline")]
    Timeout(Duration),

    /// Transport failure or a non-success status.
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// The upstream answered with a body that could not be decoded.
    #[error("upstream decode failure: {0}")]
    Decode(#[from] DecodeError),
}

impl UpstreamFetchError {
    /// Reason tag for branching without matching on payloads.
    pub fn reason(&self) -> FetchFailureReason {
        match self {
            UpstreamFetchError::Timeout(_) => FetchFailureReason::Timeout,
            UpstreamFetchError::Transport(_) => FetchFailureReason::Transport,
            UpstreamFetchError::Decode(_) => FetchFailureReason::Decode,
        }
    }
}

/// Failure while appending a quote record.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The write did not complete within its deadline.
    #[error("persistence exceeded its {0:?} deadline")]
    Timeout(Duration),

    /// SQLite rejected the schema creation or the insert.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The blocking worker running the write panicked or was cancelled.
    #[error("storage worker failed: {0}")]
    Worker(String),
}

impl PersistenceError {
    /// True when the failure is a deadline breach rather than a storage fault.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PersistenceError::Timeout(_))
            || matches!(
                self,
                PersistenceError::Storage(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::OperationInterrupted
                        || e.code == rusqlite::ErrorCode::DatabaseBusy
            )
    }
}

/// Fatal start-up error of the server process.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store could not be prepared.
    #[error("store initialisation failed: {0}")]
    Store(#[from] PersistenceError),

    /// The upstream HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

//! Error types used across the relay client.
//!
//! Every variant is fatal to the client process. `Timeout` is kept apart from
//! the other causes so the binary can report a deadline breach with its own
//! message; the exit behaviour is the same for all of them.
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use quote_relay_common::DecodeError;
use thiserror::Error;

/// Unified error type for the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The whole request did not complete within the client deadline.
    #[error("request to the relay exceeded the {0:?} deadline")]
    Timeout(Duration),

    /// The relay could not be reached or the exchange broke off.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with something other than 200 OK.
    #[error("server error: status {status}, body: {body}")]
    ServerStatus {
        /// HTTP status returned by the relay.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The relay's 200 body was not a valid `QuoteResponse`.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The artifact file could not be written.
    #[error("failed to write artifact '{}': {source}", path.display())]
    Artifact {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ClientError {
    /// True when the client's own deadline fired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }
}

//!
//! Common types and utilities shared by the quote relay server and client.
//!
//! This crate aggregates:
//! - `error` — decoding and configuration errors used across the workspace.
//! - `result` — handy `Result<T, ConfigError>` alias.
//! - `quote` — the `Quote` observation, its upstream envelope and the `QuoteResponse` wire type.
//! - `config` — `RelayConfig` with every timeout, URL and path the binaries need.
//! - `net` — default addresses, routes and file locations.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod net;
pub mod quote;
pub mod result;

pub use config::{PersistMode, RelayConfig};
pub use error::{ConfigError, DecodeError};
pub use quote::{Quote, QuoteResponse};
pub use result::Result;

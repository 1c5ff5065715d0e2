//! Crate-wide result alias tying start-up operations to `ServerError`.
//!
//! Request-path functions name their own error type (`UpstreamFetchError`,
//! `PersistenceError`) through the second parameter.

use crate::error::ServerError;

/// Convenient alias for `std::result::Result<T, ServerError>`.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

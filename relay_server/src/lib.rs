//! USD-BRL quote relay server.
//!
//! Answers `GET /cotacao` by fetching the current rate from the upstream API
//! under a fetch deadline, recording it in SQLite under a separate persistence
//! deadline, and returning the bid. The building blocks:
//!
//! - `source` — `QuoteSource` seam and the reqwest-backed `HttpQuoteSource`.
//! - `store` — `QuoteStore` seam and the rusqlite-backed `SqliteQuoteStore`.
//! - `orchestrator` — `QuoteOrchestrator`, which applies both deadlines and keeps
//!   persistence failures away from the response.
//! - `http` — axum router and the serve loop.
//!
//! Only an upstream failure fails a request; a persistence failure is logged and
//! dropped.
#![warn(missing_docs)]
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod result;
pub mod source;
pub mod store;

pub use error::{PersistenceError, ServerError, UpstreamFetchError};
pub use orchestrator::QuoteOrchestrator;
pub use result::Result;

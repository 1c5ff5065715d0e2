//! USD-BRL quote relay client.
//!
//! Requests one quote from the relay under a hard deadline and, on success,
//! overwrites a local text file with `Dólar: <bid>`. Any failure aborts the
//! whole operation.
//!
//! - `requester` — `QuoteRequester` and the `run` entry point.
//! - `artifact` — rendering and writing the output file.
//! - `error` — `ClientError`, with the deadline case kept distinct.
#![warn(missing_docs)]
pub mod artifact;
pub mod error;
pub mod requester;
pub mod result;

pub use error::ClientError;
pub use requester::{QuoteRequester, run};
pub use result::Result;

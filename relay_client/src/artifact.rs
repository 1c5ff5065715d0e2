//! Local record of the last quote received.
//!
//! The artifact is a text file holding exactly one line, `Dólar: <bid>\n`. Each
//! successful run replaces the whole file.
use std::path::Path;

use quote_relay_common::QuoteResponse;

use crate::error::ClientError;
use crate::result::Result;

/// Line written for `response`.
pub fn render(response: &QuoteResponse) -> String {
    format!("Dólar: {}\n", response.bid)
}

/// Overwrite `path` with the artifact line for `response`.
pub async fn write(path: &Path, response: &QuoteResponse) -> Result<()> {
    tokio::fs::write(path, render(response))
        .await
        .map_err(|source| ClientError::Artifact {
            path: path.to_path_buf(),
            source,
        })
}

//! Upstream quote source.
//!
//! `QuoteSource` is the seam the orchestrator fetches through; `HttpQuoteSource`
//! implements it with a single GET against the configured upstream URL. The
//! orchestrator owns the fetch deadline and drops the future when it fires, which
//! aborts the in-flight request.
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use quote_relay_common::Quote;
use reqwest::Client;

use crate::error::UpstreamFetchError;

/// Something that can produce the current USD-BRL quote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Single fetch attempt, no retries.
    async fn fetch(&self) -> Result<Quote, UpstreamFetchError>;
}

/// `QuoteSource` backed by the upstream HTTP API.
pub struct HttpQuoteSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpQuoteSource {
    /// Build a source for `url`. `timeout` is also set on the HTTP client so a
    /// stalled socket is reported as a deadline breach rather than hanging.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self) -> Result<Quote, UpstreamFetchError> {
        debug!("Requesting upstream quote from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFetchError::Transport(format!(
                "upstream answered with status {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;
        let quote = Quote::from_upstream_json(&body)?;

        info!("Upstream quote received: {}", quote.bid());
        Ok(quote)
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> UpstreamFetchError {
    if err.is_timeout() {
        UpstreamFetchError::Timeout(timeout)
    } else {
        UpstreamFetchError::Transport(err.to_string())
    }
}

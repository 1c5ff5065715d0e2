//! Per-request coordination: fetch, best-effort persist, answer.
//!
//! The two sub-deadlines are independent of each other and of any deadline the
//! caller imposed. Both are applied with `tokio::time::timeout`, so whichever of
//! the sub-deadline and the caller's own lifetime ends first wins: if the caller
//! drops the `quote()` future, the in-flight fetch or append is dropped with it.
//!
//! Only the fetch is load-bearing. A persistence failure is logged and otherwise
//! ignored; it never changes the response and never becomes a fetch failure.
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use quote_relay_common::{PersistMode, Quote, QuoteResponse, RelayConfig};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::error::{PersistenceError, UpstreamFetchError};
use crate::source::QuoteSource;
use crate::store::QuoteStore;

/// Answers quote requests from a `QuoteSource`, recording each quote in a `QuoteStore`.
pub struct QuoteOrchestrator {
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn QuoteStore>,
    fetch_timeout: Duration,
    persist_timeout: Duration,
    persist_mode: PersistMode,
    shutdown: CancellationToken,
}

impl QuoteOrchestrator {
    /// Wire an orchestrator from its collaborators and the relay settings.
    ///
    /// `shutdown` bounds detached persistence attempts to the server's lifetime.
    pub fn new(
        source: Arc<dyn QuoteSource>,
        store: Arc<dyn QuoteStore>,
        config: &RelayConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            source,
            store,
            fetch_timeout: config.fetch_timeout,
            persist_timeout: config.persist_timeout,
            persist_mode: config.persist_mode,
            shutdown,
        }
    }

    /// Handle one request.
    ///
    /// Fails only when the upstream fetch fails, in which case no persistence
    /// attempt is made.
    pub async fn quote(&self) -> Result<QuoteResponse, UpstreamFetchError> {
        let quote = self.fetch().await?;

        match self.persist_mode {
            PersistMode::Inline => {
                persist(self.store.as_ref(), &quote, self.persist_timeout).await;
            }
            PersistMode::Detached => self.spawn_persist(quote.clone()),
        }

        Ok(QuoteResponse::from(quote))
    }

    async fn fetch(&self) -> Result<Quote, UpstreamFetchError> {
        let result = match timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamFetchError::Timeout(self.fetch_timeout)),
        };

        if let Err(e) = &result {
            match e {
                UpstreamFetchError::Timeout(limit) => {
                    error!("Upstream call exceeded the {:?} deadline", limit)
                }
                other => error!("Upstream call failed: {}", other),
            }
        }
        result
    }

    fn spawn_persist(&self, quote: Quote) {
        let store = Arc::clone(&self.store);
        let persist_timeout = self.persist_timeout;
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    warn!("Persistence of quote {} abandoned: server shutting down", quote.bid());
                }
                _ = persist(store.as_ref(), &quote, persist_timeout) => {}
            }
        });
    }
}

/// One bounded append whose outcome is only logged.
async fn persist(store: &dyn QuoteStore, quote: &Quote, limit: Duration) {
    let result = match timeout(limit, store.append(quote)).await {
        Ok(result) => result,
        Err(_) => Err(PersistenceError::Timeout(limit)),
    };

    match result {
        Ok(record) => info!("Quote persisted: {} (record {})", record.value, record.id),
        Err(e) if e.is_timeout() => {
            warn!("Persisting quote {} exceeded the {:?} deadline: {}", quote.bid(), limit, e)
        }
        Err(e) => warn!("Persisting quote {} failed: {}", quote.bid(), e),
    }
}

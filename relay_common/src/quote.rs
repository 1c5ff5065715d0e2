//! Quote data model and JSON encoding helpers.
//!
//! A `Quote` is a single USD-BRL observation taken from the upstream API. The
//! upstream nests the rate under the currency-pair key (`USDBRL.bid`); only the
//! bid is kept and every other field is ignored. A `QuoteResponse` is the
//! `{"bid": "..."}` body the relay hands to the client.
use serde::{Deserialize, Serialize};

use crate::error::{Boundary, DecodeError};

/// One exchange-rate observation. The bid is kept as the decimal string the
/// upstream sent, never reparsed or reformatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    bid: String,
}

/// Upstream payload: `{"USDBRL": {"bid": "...", ...}}`.
#[derive(Debug, Deserialize)]
struct UpstreamEnvelope {
    #[serde(rename = "USDBRL")]
    usd_brl: UpstreamQuote,
}

#[derive(Debug, Deserialize)]
struct UpstreamQuote {
    bid: String,
}

impl Quote {
    /// Creates a quote from a bid string.
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }

    /// Bid value as received from the upstream.
    pub fn bid(&self) -> &str {
        &self.bid
    }

    /// Decode the upstream JSON body into a `Quote`.
    pub fn from_upstream_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let envelope: UpstreamEnvelope = serde_json::from_slice(bytes)
            .map_err(|e| DecodeError::new(Boundary::Upstream, e))?;
        Ok(Self::new(envelope.usd_brl.bid))
    }
}

/// Body returned by `GET /cotacao`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Bid value copied unmodified from the originating `Quote`.
    pub bid: String,
}

impl QuoteResponse {
    /// Decode a relay server response body.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(bytes).map_err(|e| DecodeError::new(Boundary::Server, e))
    }
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse { bid: quote.bid }
    }
}

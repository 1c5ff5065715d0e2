//! HTTP surface of the relay: `GET /cotacao`.
//!
//! Success is `200` with `{"bid": "..."}` as JSON. An upstream failure is `500`
//! with a plain-text body. Each request runs in its own task; when a client
//! disconnects, hyper drops the handler future and with it the orchestrator's
//! in-flight work.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use quote_relay_common::QuoteResponse;
use quote_relay_common::net::QUOTE_PATH;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::UpstreamFetchError;
use crate::orchestrator::QuoteOrchestrator;

/// Body sent with every upstream failure.
pub const UPSTREAM_FAILURE_BODY: &str = "failed to fetch quote from upstream API";

impl IntoResponse for UpstreamFetchError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_BODY).into_response()
    }
}

/// Router exposing the quote endpoint.
pub fn create_router(orchestrator: Arc<QuoteOrchestrator>) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(quote_handler))
        .with_state(orchestrator)
}

async fn quote_handler(
    State(orchestrator): State<Arc<QuoteOrchestrator>>,
) -> Result<Json<QuoteResponse>, UpstreamFetchError> {
    info!("Request {} received", QUOTE_PATH);
    let response = orchestrator.quote().await?;
    info!("Response sent: bid={}", response.bid);
    Ok(Json(response))
}

/// Serve `router` on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    info!("Relay listening on {}{}", listener.local_addr()?, QUOTE_PATH);
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

//! Client side of the relay: one bounded request for the current quote.
//!
//! The deadline covers the entire exchange (connect, the server's own upstream
//! fetch, response body) and is applied once around all of it. There is no
//! degraded mode: anything other than a well-formed 200 is an error.
use std::time::Duration;

use log::{debug, info};
use quote_relay_common::{QuoteResponse, RelayConfig};
use reqwest::{Client, StatusCode};
use tokio::time::timeout;

use crate::artifact;
use crate::error::ClientError;
use crate::result::Result;

/// Issues quote requests against the relay server.
pub struct QuoteRequester {
    client: Client,
    server_url: String,
    timeout: Duration,
}

impl QuoteRequester {
    /// Requester for `server_url` bounded by `timeout`.
    pub fn new(server_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            server_url: server_url.into(),
            timeout,
        }
    }

    /// Fetch one quote. A single attempt.
    pub async fn request(&self) -> Result<QuoteResponse> {
        info!(
            "Requesting quote from {} with a {:?} deadline",
            self.server_url, self.timeout
        );
        match timeout(self.timeout, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }

    async fn exchange(&self) -> Result<QuoteResponse> {
        let response = self.client.get(&self.server_url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Relay answered {} with {} bytes", status, body.len());

        if status != StatusCode::OK {
            return Err(ClientError::ServerStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let quote = QuoteResponse::from_json(&body)?;
        info!("Quote received: USD-BRL = {}", quote.bid);
        Ok(quote)
    }
}

/// Request one quote and record it in the artifact file.
///
/// Nothing is written unless the request succeeds.
pub async fn run(config: &RelayConfig) -> Result<QuoteResponse> {
    let requester = QuoteRequester::new(&config.server_url, config.client_timeout);
    let quote = requester.request().await?;
    artifact::write(&config.artifact_path, &quote).await?;
    info!("Quote saved to '{}'", config.artifact_path.display());
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn relay(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cotacao"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn config_for(server: &MockServer, dir: &TempDir) -> RelayConfig {
        RelayConfig {
            server_url: format!("{}/cotacao", server.uri()),
            artifact_path: dir.path().join("cotacao.txt"),
            ..RelayConfig::default()
        }
    }

    #[tokio::test]
    async fn success_writes_artifact() {
        let server = relay(
            ResponseTemplate::new(200).set_body_raw(r#"{"bid":"5.43"}"#, "application/json"),
        )
        .await;
        let dir = TempDir::new().unwrap();
        let config = config_for(&server, &dir);

        let quote = run(&config).await.unwrap();

        assert_eq!(quote.bid, "5.43");
        assert_eq!(
            std::fs::read_to_string(&config.artifact_path).unwrap(),
            "Dólar: 5.43\n"
        );
    }

    #[tokio::test]
    async fn slow_server_is_timeout_and_writes_nothing() {
        let server = relay(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"bid":"5.43"}"#, "application/json")
                .set_delay(Duration::from_millis(600)),
        )
        .await;
        let dir = TempDir::new().unwrap();
        let config = config_for(&server, &dir);

        let err = run(&config).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(matches!(err, ClientError::Timeout(d) if d == Duration::from_millis(300)));
        assert!(!config.artifact_path.exists());
    }

    #[tokio::test]
    async fn server_error_is_not_a_timeout() {
        let server = relay(ResponseTemplate::new(500).set_body_string("upstream down")).await;
        let dir = TempDir::new().unwrap();
        let config = config_for(&server, &dir);

        let err = run(&config).await.unwrap_err();

        match err {
            ClientError::ServerStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!config.artifact_path.exists());
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = relay(
            ResponseTemplate::new(200).set_body_raw(r#"{"ask":"5.43"}"#, "application/json"),
        )
        .await;
        let dir = TempDir::new().unwrap();
        let config = config_for(&server, &dir);

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(!config.artifact_path.exists());
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let requester =
            QuoteRequester::new(format!("http://127.0.0.1:{port}/cotacao"), Duration::from_millis(300));
        let err = requester.request().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}

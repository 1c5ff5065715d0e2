//! Client → relay server → upstream, with a real server on an ephemeral port.
use std::sync::Arc;
use std::time::Duration;

use quote_relay_client::{ClientError, run};
use quote_relay_common::RelayConfig;
use quote_relay_server::QuoteOrchestrator;
use quote_relay_server::http::{create_router, serve};
use quote_relay_server::source::HttpQuoteSource;
use quote_relay_server::store::SqliteQuoteStore;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Relay {
    config: RelayConfig,
    shutdown: CancellationToken,
    _dir: TempDir,
}

impl Drop for Relay {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn upstream_answering(template: ResponseTemplate) -> MockServer {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/last/USD-BRL"))
        .respond_with(template)
        .mount(&upstream)
        .await;
    upstream
}

async fn start_relay(upstream: &MockServer) -> Relay {
    let dir = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = RelayConfig {
        upstream_url: format!("{}/json/last/USD-BRL", upstream.uri()),
        store_location: dir.path().join("cotacao.db"),
        server_url: format!("http://{}/cotacao", addr),
        bind_addr: addr.to_string(),
        artifact_path: dir.path().join("cotacao.txt"),
        ..RelayConfig::default()
    };

    let store = SqliteQuoteStore::new(&config.store_location, config.persist_timeout);
    store.ensure_schema().await.unwrap();
    let source = HttpQuoteSource::new(&config.upstream_url, config.fetch_timeout).unwrap();
    let shutdown = CancellationToken::new();
    let orchestrator = QuoteOrchestrator::new(
        Arc::new(source),
        Arc::new(store),
        &config,
        shutdown.clone(),
    );

    let router = create_router(Arc::new(orchestrator));
    tokio::spawn(serve(listener, router, shutdown.clone()));

    Relay {
        config,
        shutdown,
        _dir: dir,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn bid_flows_from_upstream_to_artifact() {
    let upstream = upstream_answering(ResponseTemplate::new(200).set_body_raw(
        r#"{"USDBRL":{"code":"USD","codein":"BRL","bid":"5.43"}}"#,
        "application/json",
    ))
    .await;
    let relay = start_relay(&upstream).await;
    std::fs::write(&relay.config.artifact_path, "Dólar: 0.00\nold line\n").unwrap();

    let quote = run(&relay.config).await.unwrap();

    assert_eq!(quote.bid, "5.43");
    assert_eq!(
        std::fs::read_to_string(&relay.config.artifact_path).unwrap(),
        "Dólar: 5.43\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_upstream_is_server_error_not_timeout() {
    let upstream = upstream_answering(
        ResponseTemplate::new(200)
            .set_body_raw(r#"{"USDBRL":{"bid":"5.43"}}"#, "application/json")
            .set_delay(Duration::from_millis(250)),
    )
    .await;
    let relay = start_relay(&upstream).await;

    let err = run(&relay.config).await.unwrap_err();

    assert!(!err.is_timeout(), "unexpected timeout: {err}");
    assert!(matches!(err, ClientError::ServerStatus { status: 500, .. }));
    assert!(!relay.config.artifact_path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn successive_runs_keep_only_latest_bid() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"USDBRL":{"bid":"5.43"}}"#, "application/json"),
        )
        .up_to_n_times(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"USDBRL":{"bid":"5.50"}}"#, "application/json"),
        )
        .mount(&upstream)
        .await;
    let relay = start_relay(&upstream).await;

    run(&relay.config).await.unwrap();
    run(&relay.config).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(&relay.config.artifact_path).unwrap(),
        "Dólar: 5.50\n"
    );
}

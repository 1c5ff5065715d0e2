//! Shared networking constants used by client and server.

/// Route served by the relay and requested by the client.
pub const QUOTE_PATH: &str = "/cotacao";
/// Default bind address for the relay server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Default URL the client requests.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";
/// Upstream endpoint returning the latest USD-BRL rate.
pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// SQLite file the server appends observed quotes to.
pub const DEFAULT_STORE_LOCATION: &str = "cotacao.db";
/// Text file the client overwrites with the latest bid.
pub const DEFAULT_ARTIFACT_PATH: &str = "cotacao.txt";

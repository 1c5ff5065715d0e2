//! Quote relay client: requests the current USD-BRL bid from the relay server
//! and writes it to a local file.
//!
//! Usage example (CLI):
//! ```bash
//! quote_relay_client --server-url http://localhost:8080/cotacao --output ./cotacao.txt
//! ```
//!
//! The whole request is bounded by `--timeout-ms` (300 ms by default). Any
//! failure is logged as fatal and the process exits with status 1; a deadline
//! breach gets its own message.
#![warn(missing_docs)]
mod args;

use std::process::ExitCode;

use clap::Parser;
use log::error;
use quote_relay_client::{ClientError, run};

use crate::args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logger();
    let config = Args::parse().into_config();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e @ ClientError::Timeout(_)) => {
            error!("Timeout: request to {} exceeded the deadline: {}", config.server_url, e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

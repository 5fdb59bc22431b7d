//! Serves parameter-gated demo endpoints over HTTP/1.1 and HTTP/2.
//!
//! Set `RUST_LOG=debug` to see rejected requests.

mod config;
mod error;
mod http;
mod routes;

use config::ServerConfig;
use error::ServerError;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    let router = Arc::new(routes::build_router()?);
    http::serve(&config, router).await
}

//! Example to run the Tesseract server standalone
//!
//! Run with: cargo run -p tesseract-server --example run_server

use tesseract_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::default();

    println!("Open http://localhost:{}/", config.port);

    run_server(config).await
}

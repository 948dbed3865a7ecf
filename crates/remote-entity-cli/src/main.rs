//! remote-entity - command-line front end for the bearer-session auth client
//! and the SOAP todo client.

mod actions;
mod commands;
mod render;

use std::io;

use anyhow::Result;
use remote_entity_core::Config;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let matches = commands::new().get_matches();
    let mut config = Config::load()?;
    debug!(auth = %config.auth_base_url, soap = %config.soap_url, "Configuration loaded");

    if let Err(e) = actions::dispatch(&matches, &mut config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("remote-entity finished");
    Ok(())
}

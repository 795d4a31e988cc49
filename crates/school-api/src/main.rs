//! School attendance API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p school-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use anyhow::Context;
use school_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = try_init_tracing(TracingConfig::from_env()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = format!("{e:#}"), "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting school attendance API...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        redis = config.redis.is_some(),
        "Configuration loaded"
    );

    school_api::run(config).await.context("Server error")?;

    Ok(())
}

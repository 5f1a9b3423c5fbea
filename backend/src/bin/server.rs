//! Occupancy HTTP Server Binary
//!
//! This is the main entry point for the occupancy REST API server.
//! It loads the configuration, loads the sales log once, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin occupancy-server
//!
//! OCCUPANCY_DATA_PATH=/srv/seasonal_ph_sales.csv PORT=9000 \
//!   cargo run --bin occupancy-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `OCCUPANCY_DATA_PATH`: Sales CSV (default: ./seasonal_ph_sales.csv)
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use std::env;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ph_occupancy::cache::DatasetCache;
use ph_occupancy::config::AppConfig;
use ph_occupancy::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting occupancy HTTP server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    let addr = config.bind_addr()?;

    // A malformed file stops the server before it serves anything
    let cache = DatasetCache::new();
    let table = cache
        .get_or_load(&config.data.path)
        .with_context(|| format!("Failed to load sales from {}", config.data.path.display()))?;
    info!(
        "Loaded {} events across {} draws from {}",
        table.len(),
        table.draws().len(),
        config.data.path.display()
    );

    let state = AppState::new(cache, config.data.path.clone());
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Dashboard data: http://{}/v1/occupancy", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

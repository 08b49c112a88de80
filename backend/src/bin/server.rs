//! Air-quality HTTP Server Binary
//!
//! This is the main entry point for the air-quality REST API server.
//! It initializes the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the tables named in repository.toml
//! cargo run --bin airq-server
//!
//! # Run against two CSV files without a config file
//! AIRQ_LOCATIONS_CSV=data/sensor_locations.csv \
//! AIRQ_READINGS_CSV=data/air_quality_data.csv \
//!   cargo run --bin airq-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `csv` or `local`, used when no repository.toml is found
//! - `AIRQ_LOCATIONS_CSV` / `AIRQ_READINGS_CSV`: table paths, override repository.toml
//! - `RUST_LOG`: Log filter directives, e.g. `debug` or `airq=debug,tower_http=info`
//!   (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airq::db::{RepositoryFactory, SensorDataRepository};
use airq::http::{create_router, AppState};

const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from `RUST_LOG`, falling back to `info` when the
/// variable is unset or holds an invalid directive.
fn log_filter(raw: Option<&str>) -> EnvFilter {
    raw.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_repository() -> anyhow::Result<Arc<dyn SensorDataRepository>> {
    match RepositoryFactory::from_default_config() {
        Ok(repo) => Ok(repo),
        Err(e) => {
            warn!("{}; falling back to environment configuration", e);
            RepositoryFactory::from_env().map_err(|e| anyhow::anyhow!(e))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    FmtSubscriber::builder()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting air-quality HTTP Server");

    let repository = init_repository()?;
    match repository.health_check().await {
        Ok(true) => info!("Repository initialized successfully"),
        Ok(false) => warn!("Repository initialized but its tables are not reachable yet"),
        Err(e) => warn!("Repository health check failed: {}", e),
    }

    // Create application state
    let state = AppState::new(repository);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Canchita Server - Court Booking
//!
//! REST API server for booking courts by the hour.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canchita_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{Services, SystemClock},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("canchita_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Canchita Server v{}", env!("CARGO_PKG_VERSION"));

    let today = Local::now().date_naive();
    let repository = Repository::from_config(today, &config.bookings);
    let services = Services::new(repository, Arc::new(SystemClock));

    tracing::info!(
        recurrence_weeks = config.bookings.recurrence_weeks,
        %today,
        "Booking store ready"
    );

    let addr = SocketAddr::new(
        config.server.host.parse::<IpAddr>().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod report;
mod routes;
mod templates;
mod units;
mod weather;

use config::Config;
use routes::AppState;
use weather::OpenWeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("weather_server=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    if config.request_timeout.is_none() {
        warn!("WEATHER_TIMEOUT_SECS is not set; provider calls will wait indefinitely");
    }

    let provider = OpenWeatherClient::new(&config)?;
    let state = AppState {
        provider: Arc::new(provider),
    };

    let app = routes::app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🦀 Weather server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

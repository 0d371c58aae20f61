//! Toll engine HTTP server.
//!
//! Reads its configuration directory from `TOLL_CONFIG` (default
//! `./config/sweden_2013`) and listens on `TOLL_BIND` (default `0.0.0.0:8080`).

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use toll_engine::api::{AppState, create_router};
use toll_engine::calculation::{FixedHolidayCalendar, TollEngine};
use toll_engine::config::ConfigLoader;
use toll_engine::error::EngineError;

const DEFAULT_CONFIG_DIR: &str = "./config/sweden_2013";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("TOLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let state = match ConfigLoader::load(&config_dir) {
        Ok(config) => {
            info!(
                config_dir = %config_dir,
                holidays = %config.holidays().name,
                "Configuration loaded"
            );
            AppState::from_config(&config)?
        }
        Err(EngineError::ConfigNotFound { path }) => {
            warn!(path = %path, "Configuration not found, using built-in schedule");
            AppState::new(TollEngine::new(FixedHolidayCalendar::swedish_2013())?)
        }
        Err(err) => return Err(err.into()),
    };

    let engine = state.engine();
    info!(
        intervals = engine.fee_table().intervals().len(),
        grace_period_secs = engine.grace_period().num_seconds(),
        daily_cap = engine.daily_cap(),
        "Toll engine ready"
    );

    let bind_addr = env::var("TOLL_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

//! Pokedex API Server Entry Point
//!
//! Loads configuration, connects the cache backend, and starts the Axum
//! HTTP server.

use axum::Router;
use pokedex_api::{build_state, create_api_router, ApiError, ApiResult, AppConfig};

use pokedex_api::telemetry::{init_tracing, TelemetryConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let config = AppConfig::load();
    let state = build_state(&config).await?;

    let app: Router = create_api_router(state, &config.cors);

    let addr = config.bind_addr()?;
    tracing::info!(
        %addr,
        service = %telemetry_config.service_name,
        version = %telemetry_config.service_version,
        "Starting Pokedex API server"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

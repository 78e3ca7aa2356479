//! Application bootstrap wiring.

use std::sync::Arc;

use notifly_api::{ApiConfig, ApiServer};
use notifly_telemetry::{LogFormat, LoggingConfig, Metrics};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::gateway::HttpPushGateway;

/// Load configuration, install telemetry, and serve the API until shutdown.
///
/// # Errors
///
/// Returns an error when telemetry cannot be installed or the server fails
/// to bind or terminates unexpectedly.
pub async fn run_app() -> AppResult<()> {
    let config = ApiConfig::from_env();

    let logging = LoggingConfig {
        level: &config.log_level,
        format: LogFormat::parse(&config.log_format),
        build_sha: option_env!("NOTIFLY_BUILD_SHA").unwrap_or("dev"),
    };
    notifly_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init_logging", err))?;

    let telemetry = Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;

    let push = Arc::new(HttpPushGateway::new(
        config.push_endpoint.clone(),
        config.push_api_key.clone(),
    ));

    info!(
        addr = %config.listen_addr(),
        push_endpoint = %config.push_endpoint,
        "starting notifly"
    );
    let server = ApiServer::new(telemetry, push);
    server
        .serve(config.listen_addr())
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))
}

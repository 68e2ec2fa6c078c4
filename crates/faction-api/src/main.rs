//! Faction stats API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p faction-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use faction_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // The log format depends on APP_ENV, so configuration is read first
    let config = AppConfig::from_env();

    let env = config.as_ref().map_or(Environment::default(), |c| c.app.env);
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        upstream = %config.upstream.base_url,
        pacing_ms = config.aggregation.pacing_interval_ms,
        include_profile = config.aggregation.include_profile,
        "Configuration loaded"
    );

    if let Err(e) = faction_api::run(config).await {
        error!(code = e.error_code(), error = %e, "Server failed");
        std::process::exit(1);
    }
}

//! API settings entry point
//!
//! Run with:
//! ```bash
//! APP_ENV=prod JWT_SECRET=... cargo run -p api-settings
//! ```
//!
//! Reads a `.env` file if present, then the process environment, and logs
//! the effective settings. The JWT secret is never logged.

use anyhow::{Context, Result};
use api_common::{try_init_tracing_with_config, Settings, TracingConfig};
use tracing::{debug, error, info, warn};

fn main() {
    // Variables already in the process environment take precedence.
    let dotenv = dotenvy::dotenv();

    let settings = Settings::from_env();

    // The log format depends on the environment, so tracing starts after loading.
    let tracing_config = TracingConfig::for_environment(settings.environment());
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to read .env file"),
    }

    if let Err(e) = run(&settings) {
        error!(error = %e, "Startup failed");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<()> {
    for var in settings.defaulted() {
        debug!(var = *var, "not set, using default");
    }

    let summary = serde_json::to_string(settings).context("failed to serialize settings")?;
    let environment = settings.environment();

    info!(
        environment = environment.map_or("unknown", |e| e.as_str()),
        settings = %summary,
        "Settings loaded"
    );

    if environment.is_none() {
        warn!(app_env = settings.app_env(), "Unrecognised APP_ENV, using default log preset");
    }

    if environment.is_some_and(|e| e.is_production()) && settings.uses_default_secret() {
        warn!("JWT_SECRET is the built-in default in production");
    }

    Ok(())
}

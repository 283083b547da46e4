//! Startup helpers for the `LexiMind` server.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::server::{self, AppState};

/// Run the server until Ctrl+C.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting LexiMind v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = serve() {
        tracing::error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn serve() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
    }

    let config = load_config()?;

    // Built before the runtime and dropped after it: the blocking HTTP client
    // must not be torn down inside async code.
    let state = AppState::new(&config).context("failed to create state")?;

    let rt = tokio::runtime::Runtime::new().context("failed to create runtime")?;
    rt.block_on(server::run_server_with_shutdown(
        Arc::clone(&state),
        config.port,
        shutdown_signal(),
    ))?;
    drop(rt);

    tracing::info!("LexiMind stopped");
    Ok(())
}

/// Read and validate the configuration from the process environment.
///
/// # Errors
/// Returns an error if the configuration is invalid.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;

    tracing::info!("Model: {}", config.model);
    if config.credential_loaded() {
        tracing::info!("API key loaded");
    } else {
        tracing::warn!(
            "{} is not set; analyses will be blocked until it is provided",
            crate::config::API_KEY_ENV
        );
    }

    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

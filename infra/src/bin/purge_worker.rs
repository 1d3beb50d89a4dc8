//! Periodically removes expired entries from the configured revocation store
//!
//! Runs until interrupted with Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use tg_core::services::token::{PurgeConfig, RevocationPurger};
use tg_infra::bootstrap::build_token_service;
use tg_infra::telemetry::init_tracing;
use tg_shared::config::{AppConfig, Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    if dotenvy::from_filename(environment.env_file()).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.logging_config())?;

    info!(
        "Starting Tollgate purge worker ({}, backend {})",
        config.environment, config.revocation.backend
    );
    if config.auth.token.is_using_default_secret() {
        warn!("Using the default signing secret; set SECRET_KEY before deploying");
    }

    let service = build_token_service(&config)
        .await
        .context("connecting revocation store")?;

    let purge_config = PurgeConfig::from(&config.revocation);
    let purger = Arc::new(RevocationPurger::new(service, purge_config));

    let Some(handle) = purger.start_background_task() else {
        info!("Purge disabled by configuration, exiting");
        return Ok(());
    };

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("Shutdown signal received, stopping purge worker");
    handle.abort();

    Ok(())
}

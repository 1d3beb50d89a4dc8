//! Periodic purge of expired revocation entries
//!
//! Entries only need to outlive the token they revoke, so the purger
//! regularly drops everything whose expiry has passed to keep the
//! revocation set bounded.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use tg_shared::config::RevocationConfig;

use crate::errors::TokenError;
use crate::repositories::RevocationStore;

use super::service::TokenService;

/// Configuration for the revocation purger
#[derive(Debug, Clone)]
pub struct PurgeConfig {
    /// How often to run the purge (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the purge at all
    pub enabled: bool,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

impl From<&RevocationConfig> for PurgeConfig {
    fn from(config: &RevocationConfig) -> Self {
        Self {
            interval_seconds: config.purge_interval_seconds,
            enabled: config.purge_enabled,
        }
    }
}

/// Runs `purge_expired` on a fixed interval
pub struct RevocationPurger<S: RevocationStore + ?Sized + 'static> {
    service: Arc<TokenService<S>>,
    config: PurgeConfig,
}

impl<S: RevocationStore + ?Sized + 'static> RevocationPurger<S> {
    /// Create a new purger
    pub fn new(service: Arc<TokenService<S>>, config: PurgeConfig) -> Self {
        Self { service, config }
    }

    /// Run a single purge cycle
    ///
    /// # Returns
    /// * `Ok(PurgeResult)` - Summary of the cycle; disabled purgers report nothing purged
    /// * `Err(TokenError)` - The store call failed or timed out
    pub async fn run_purge(&self) -> Result<PurgeResult, TokenError> {
        if !self.config.enabled {
            return Ok(PurgeResult::default());
        }

        let entries_purged = self.service.purge_expired().await?;
        info!("Purged {} expired revocation entries", entries_purged);

        Ok(PurgeResult { entries_purged })
    }

    /// Start the purger as a background task
    ///
    /// Returns `None` when purging is disabled. Failed cycles are logged and
    /// the loop keeps going.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation purge is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Revocation purger started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_purge().await {
                    error!("Revocation purge cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a purge cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeResult {
    /// Number of revocation entries removed
    pub entries_purged: usize,
}

//! Configuration module with concern-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing secret and token lifetimes
//! - `revocation` - Revocation store backend, timeouts and purge schedule
//! - `database` - MySQL connection and pool configuration
//! - `cache` - Redis connection configuration
//! - `environment` - Environment detection and logging configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `config/<environment>.toml` file, then `TOLLGATE__*` environment variables,
//! then the legacy single-name variables (`SECRET_KEY`, `DATABASE_URL`, ...).

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod revocation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, TokenConfig, MAX_TOKEN_LIFETIME_SECONDS};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use revocation::{RevocationBackend, RevocationConfig};

/// Prefix for structured environment overrides, e.g. `TOLLGATE__AUTH__TOKEN__SECRET`
pub const ENV_PREFIX: &str = "TOLLGATE";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token authentication configuration
    pub auth: AuthConfig,

    /// Revocation store configuration
    pub revocation: RevocationConfig,

    /// Database configuration (used by the `mysql` revocation backend)
    pub database: DatabaseConfig,

    /// Redis configuration (used by the `redis` revocation backend)
    pub cache: CacheConfig,

    /// Logging configuration; falls back to the environment's defaults when absent
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Load configuration from files and environment variables, then validate it
    pub fn load() -> Result<Self, ConfigValidationError> {
        let environment = Environment::from_env();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment.to_string())?
            .set_override_option("auth.token.secret", std::env::var("SECRET_KEY").ok())?
            .set_override_option(
                "auth.token.access_token_expiry",
                legacy_seconds("ACCESS_TOKEN_EXPIRE_MINUTES", 60)?,
            )?
            .set_override_option(
                "auth.token.refresh_token_expiry",
                legacy_seconds("REFRESH_TOKEN_EXPIRE_DAYS", 86_400)?,
            )?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.url", std::env::var("REDIS_URL").ok())?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.auth.token.validate(self.environment)?;
        self.revocation.validate()
    }

    /// Effective logging configuration
    pub fn logging_config(&self) -> LoggingConfig {
        self.logging
            .clone()
            .unwrap_or_else(|| LoggingConfig::for_environment(self.environment))
    }
}

/// Read a legacy whole-unit variable (minutes, days) and convert it to seconds
fn legacy_seconds(var: &str, unit_seconds: i64) -> Result<Option<i64>, ConfigValidationError> {
    match std::env::var(var) {
        Ok(raw) => {
            let invalid = |message: String| ConfigValidationError::InvalidValue {
                key: var.to_string(),
                message,
            };
            let value = raw.trim().parse::<i64>().map_err(|e| invalid(e.to_string()))?;
            value
                .checked_mul(unit_seconds)
                .map(Some)
                .ok_or_else(|| invalid(format!("{} is out of range", value)))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_environment_logging() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.logging.is_none());
        assert_eq!(config.logging_config().level, "debug");
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "auth": { "token": { "secret": "a-very-long-secret-used-only-in-this-unit-test" } },
            "revocation": { "backend": "redis" }
        }))
        .unwrap();

        assert_eq!(config.auth.token.access_token_expiry, 1800);
        assert_eq!(config.revocation.backend, RevocationBackend::Redis);
        assert_eq!(config.revocation.store_timeout_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_seconds_conversion() {
        std::env::set_var("TG_TEST_LEGACY_MINUTES", " 15 ");
        assert_eq!(legacy_seconds("TG_TEST_LEGACY_MINUTES", 60).unwrap(), Some(900));

        assert_eq!(legacy_seconds("TG_TEST_LEGACY_UNSET", 60).unwrap(), None);

        std::env::set_var("TG_TEST_LEGACY_GARBAGE", "soon");
        assert!(legacy_seconds("TG_TEST_LEGACY_GARBAGE", 60).is_err());
    }

    #[test]
    fn test_legacy_seconds_overflow_is_invalid() {
        std::env::set_var("TG_TEST_LEGACY_DAYS_OVERFLOW", "999999999999999999");
        let result = legacy_seconds("TG_TEST_LEGACY_DAYS_OVERFLOW", 86_400);
        assert!(matches!(
            result,
            Err(ConfigValidationError::InvalidValue { ref key, .. }) if key == "TG_TEST_LEGACY_DAYS_OVERFLOW"
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_refresh_lifetime() {
        let mut config = AppConfig::default();
        config.auth.token.refresh_token_expiry = i64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_lifetimes() {
        let mut config = AppConfig::default();
        config.auth.token.access_token_expiry = 7200;
        config.auth.token.refresh_token_expiry = 3600;
        assert!(config.validate().is_err());
    }
}

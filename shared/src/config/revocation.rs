//! Revocation store configuration

use serde::{Deserialize, Serialize};

use super::ConfigValidationError;

/// Backing storage for revoked token identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Process-local map; single instance deployments and tests
    #[default]
    Memory,
    /// `revoked_tokens` table in MySQL
    Mysql,
    /// One key per revoked token in Redis
    Redis,
}

impl std::fmt::Display for RevocationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevocationBackend::Memory => write!(f, "memory"),
            RevocationBackend::Mysql => write!(f, "mysql"),
            RevocationBackend::Redis => write!(f, "redis"),
        }
    }
}

/// Revocation store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RevocationConfig {
    /// Storage backend
    pub backend: RevocationBackend,

    /// Upper bound for a single store call in milliseconds
    pub store_timeout_ms: u64,

    /// How often the purge task runs (in seconds)
    pub purge_interval_seconds: u64,

    /// Whether the purge task runs at all
    pub purge_enabled: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: RevocationBackend::default(),
            store_timeout_ms: 2000,
            purge_interval_seconds: 3600, // Run every hour
            purge_enabled: true,
        }
    }
}

impl RevocationConfig {
    /// Store timeout as a `Duration`
    pub fn store_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.store_timeout_ms)
    }

    /// Validate timing values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.store_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidValue {
                key: "revocation.store_timeout_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.purge_enabled && self.purge_interval_seconds == 0 {
            return Err(ConfigValidationError::InvalidValue {
                key: "revocation.purge_interval_seconds".to_string(),
                message: "must be positive when purging is enabled".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revocation_config_default() {
        let config = RevocationConfig::default();
        assert_eq!(config.backend, RevocationBackend::Memory);
        assert_eq!(config.store_timeout(), std::time::Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_parsing() {
        let backend: RevocationBackend = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(backend, RevocationBackend::Mysql);
        assert_eq!(backend.to_string(), "mysql");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = RevocationConfig {
            store_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

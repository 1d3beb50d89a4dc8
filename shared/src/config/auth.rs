//! Token authentication configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::ConfigValidationError;

/// Secret used when nothing else is configured; refused in production
const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Minimum secret length accepted in production (HMAC-SHA256 block of entropy)
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime: ten years, in seconds
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * 86_400;

/// Token signing and lifetime configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 1800,    // 30 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl TokenConfig {
    /// Create a new token configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    ///
    /// Out-of-range values saturate and are then rejected by `validate`.
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86_400);
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Validate secret strength and lifetime ordering
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigValidationError> {
        if self.secret.trim().is_empty() {
            return Err(invalid("auth.token.secret", "must not be empty"));
        }

        if environment.is_production() {
            if self.is_using_default_secret() {
                return Err(invalid(
                    "auth.token.secret",
                    "the development default cannot be used in production",
                ));
            }
            if self.secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(invalid(
                    "auth.token.secret",
                    &format!("must be at least {} bytes", MIN_PRODUCTION_SECRET_LEN),
                ));
            }
        }

        if self.access_token_expiry <= 0 {
            return Err(invalid("auth.token.access_token_expiry", "must be positive"));
        }

        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(invalid(
                "auth.token.refresh_token_expiry",
                "must be longer than the access token expiry",
            ));
        }

        if self.refresh_token_expiry > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(invalid(
                "auth.token.refresh_token_expiry",
                &format!("must not exceed {} seconds", MAX_TOKEN_LIFETIME_SECONDS),
            ));
        }

        Ok(())
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token configuration
    pub token: TokenConfig,
}

fn invalid(key: &str, message: &str) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_default() {
        let config = TokenConfig::default();
        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert!(config.is_using_default_secret());
        assert!(config.validate(Environment::Development).is_ok());
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::new("my-secret")
            .with_access_expiry_minutes(15)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let config = TokenConfig::default();
        assert!(config.validate(Environment::Production).is_err());

        let short = TokenConfig::new("too-short");
        assert!(short.validate(Environment::Production).is_err());

        let strong = TokenConfig::new("x".repeat(MIN_PRODUCTION_SECRET_LEN));
        assert!(strong.validate(Environment::Production).is_ok());
    }

    #[test]
    fn test_oversized_lifetimes_rejected() {
        let config = TokenConfig::new("my-secret").with_refresh_expiry_days(i64::MAX / 2);
        assert_eq!(config.refresh_token_expiry, i64::MAX);
        assert!(config.validate(Environment::Development).is_err());

        let mut at_cap = TokenConfig::new("my-secret");
        at_cap.refresh_token_expiry = MAX_TOKEN_LIFETIME_SECONDS;
        assert!(at_cap.validate(Environment::Development).is_ok());

        at_cap.refresh_token_expiry = MAX_TOKEN_LIFETIME_SECONDS + 1;
        assert!(at_cap.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = TokenConfig::new("   ");
        assert!(config.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}

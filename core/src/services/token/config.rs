//! Configuration for the token service

use std::time::Duration;

use tg_shared::config::{RevocationConfig, TokenConfig};

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,
    /// Upper bound for a single revocation store call
    pub store_timeout: Duration,
}

impl TokenServiceConfig {
    /// Build from the shared token and revocation settings
    pub fn from_settings(token: &TokenConfig, revocation: &RevocationConfig) -> Self {
        Self {
            secret: token.secret.clone(),
            access_token_expiry_seconds: token.access_token_expiry,
            refresh_token_expiry_seconds: token.refresh_token_expiry,
            store_timeout: revocation.store_timeout(),
        }
    }

    /// Replace the signing secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Set both lifetimes in seconds
    pub fn with_expiry(mut self, access_seconds: i64, refresh_seconds: i64) -> Self {
        self.access_token_expiry_seconds = access_seconds;
        self.refresh_token_expiry_seconds = refresh_seconds;
        self
    }

    /// Set the store call timeout
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from_settings(&TokenConfig::default(), &RevocationConfig::default())
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry_seconds", &self.access_token_expiry_seconds)
            .field("refresh_token_expiry_seconds", &self.refresh_token_expiry_seconds)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

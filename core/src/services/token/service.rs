//! Main token service implementation

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::clock::{Clock, SystemClock};
use tg_shared::config::MAX_TOKEN_LIFETIME_SECONDS;

use crate::domain::entities::token::{Claims, RevocationEntry, TokenPair, TokenType};
use crate::errors::{StoreError, TokenError};
use crate::repositories::RevocationStore;

use super::bearer::extract_bearer_token;
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::signer::Signer;

/// Service issuing, verifying, rotating and revoking tokens
///
/// Holds only immutable state; share it behind an `Arc`. The revocation
/// store is the single piece of shared mutable state, and refresh rotation
/// relies on its conditional write rather than on any in-process lock.
pub struct TokenService<S: RevocationStore + ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<S: RevocationStore + ?Sized> TokenService<S> {
    /// Creates a new token service using the system clock
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store shared with other service instances
    /// * `config` - Secret, lifetimes and store timeout
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or `Internal` if the configuration is unusable
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> Result<Self, TokenError> {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }

    /// Creates a new token service with an explicit clock
    pub fn with_clock(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Result<Self, TokenError> {
        if config.access_token_expiry_seconds <= 0 {
            return Err(TokenError::internal("access token lifetime must be positive"));
        }
        if config.refresh_token_expiry_seconds <= config.access_token_expiry_seconds {
            return Err(TokenError::internal(
                "refresh token lifetime must exceed access token lifetime",
            ));
        }
        if config.refresh_token_expiry_seconds > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(TokenError::internal(
                "refresh token lifetime exceeds the supported maximum",
            ));
        }
        if config.store_timeout.is_zero() {
            return Err(TokenError::internal("store timeout must be positive"));
        }

        let codec = TokenCodec::new(Signer::new(config.secret.as_bytes())?);

        Ok(Self {
            store,
            clock,
            codec,
            config,
        })
    }

    /// Service configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Revocation store handle
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issues a fresh access + refresh pair for `subject`
    ///
    /// No store side effect; the only failure is `Internal`.
    pub fn issue(&self, subject: &str) -> Result<TokenPair, TokenError> {
        let now = self.clock.now();
        let pair = self.mint_pair(subject, now)?;
        info!(subject = %subject, "Issued token pair");
        Ok(pair)
    }

    /// Verifies `token` and returns its claims
    ///
    /// Checks run in order: signature, type, expiry, revocation. Tokens
    /// failing an earlier check never reach the store.
    pub async fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let now = self.clock.now();
        self.verify_at(token, expected, now).await
    }

    /// Verifies the token carried in an `Authorization` header value
    pub async fn verify_bearer(
        &self,
        authorization: Option<&str>,
        expected: TokenType,
    ) -> Result<Claims, TokenError> {
        let token = extract_bearer_token(authorization)?;
        self.verify(token, expected).await
    }

    /// Exchanges a refresh token for a new pair, revoking the presented one
    ///
    /// Of several concurrent calls with the same token at most one succeeds;
    /// the rest fail with `Revoked`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let now = self.clock.now();

        let claims = match self.verify_at(refresh_token, TokenType::Refresh, now).await {
            Ok(claims) => claims,
            Err(TokenError::Revoked) => {
                warn!("Rotated-out or revoked refresh token presented again");
                return Err(TokenError::Revoked);
            }
            Err(e) => return Err(e),
        };

        let entry = RevocationEntry::for_claims(&claims);
        let won = self
            .store_call(self.store.try_revoke(&entry.unique_id, entry.expires_at))
            .await?;
        if !won {
            warn!(
                jti = %claims.jti,
                subject = %claims.sub,
                "Refresh token already rotated by a concurrent request"
            );
            return Err(TokenError::Revoked);
        }

        let pair = self.mint_pair(&claims.sub, now)?;
        info!(jti = %claims.jti, subject = %claims.sub, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes `token` until its original expiry
    ///
    /// Only the signature is checked; expired or already revoked tokens are
    /// accepted and revoking twice is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let claims = self.codec.decode(token).map_err(|e| {
            debug!(error = %e, "Rejected token for revocation");
            TokenError::from(e)
        })?;

        let entry = RevocationEntry::for_claims(&claims);
        self.store_call(self.store.revoke(&entry.unique_id, entry.expires_at))
            .await?;
        info!(jti = %claims.jti, typ = %claims.typ, subject = %claims.sub, "Revoked token");
        Ok(())
    }

    /// Revokes whichever tokens were presented at logout
    ///
    /// Both revocations are attempted; the first failure is returned.
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<(), TokenError> {
        let mut first_error = None;

        for token in [access_token, refresh_token].into_iter().flatten() {
            if let Err(e) = self.revoke(token).await {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Drops revocation entries for tokens that have expired by now
    pub async fn purge_expired(&self) -> Result<usize, TokenError> {
        let now = self.clock.now();
        let purged = self.store_call(self.store.purge_expired(now)).await?;
        debug!(purged, "Purged expired revocation entries");
        Ok(purged)
    }

    async fn verify_at(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let claims = self.codec.decode(token).map_err(|e| {
            debug!(error = %e, "Rejected token");
            TokenError::from(e)
        })?;

        if claims.typ != expected {
            debug!(jti = %claims.jti, expected = %expected, actual = %claims.typ, "Wrong token type");
            return Err(TokenError::WrongType {
                expected,
                actual: claims.typ,
            });
        }

        if claims.is_expired_at(now) {
            debug!(jti = %claims.jti, "Token expired");
            return Err(TokenError::Expired);
        }

        if self.store_call(self.store.is_revoked(&claims.jti)).await? {
            debug!(jti = %claims.jti, "Token revoked");
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }

    fn mint_pair(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        let access = Claims::new_access_token(subject, now, self.config.access_token_expiry_seconds)
            .ok_or_else(|| TokenError::internal("access token expiry out of range"))?;
        let refresh =
            Claims::new_refresh_token(subject, now, self.config.refresh_token_expiry_seconds)
                .ok_or_else(|| TokenError::internal("refresh token expiry out of range"))?;

        Ok(TokenPair::new(
            self.codec.encode(&access)?,
            self.codec.encode(&refresh)?,
            self.config.access_token_expiry_seconds,
            self.config.refresh_token_expiry_seconds,
        ))
    }

    async fn store_call<T, F>(&self, call: F) -> Result<T, TokenError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let result = match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout),
        };
        result.map_err(|e| {
            warn!(error = %e, "Revocation store call failed");
            TokenError::from(e)
        })
    }
}

impl<S: RevocationStore + ?Sized> std::fmt::Debug for TokenService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("codec", &self.codec)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

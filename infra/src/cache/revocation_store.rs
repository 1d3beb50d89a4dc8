//! Redis implementation of the RevocationStore trait
//!
//! One key per revoked token, `<prefix>:revoked:<jti>`, expiring when the
//! token would have. Redis drops the keys itself, so there is nothing to
//! purge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use tg_core::errors::StoreError;
use tg_core::repositories::RevocationStore;

use super::redis_client::RedisClient;

const REVOKED_KEY_SPACE: &str = "revoked";

/// Redis-backed revocation store
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Full key for a token ID
    pub fn revoked_key(&self, unique_id: &str) -> String {
        self.client
            .make_key(&format!("{}:{}", REVOKED_KEY_SPACE, unique_id))
    }

    /// Underlying client
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn try_revoke(&self, unique_id: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let key = self.revoked_key(unique_id);
        let inserted = self.client.set_if_absent_until(&key, "1", expires_at).await?;
        if !inserted {
            debug!(jti = %unique_id, "Token already present in revocation keys");
        }
        Ok(inserted)
    }

    async fn is_revoked(&self, unique_id: &str) -> Result<bool, StoreError> {
        Ok(self.client.exists(&self.revoked_key(unique_id)).await?)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        // Keys carry their own expiry
        Ok(0)
    }
}

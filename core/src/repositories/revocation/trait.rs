//! Revocation store trait defining the interface for revoked token IDs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::StoreError;

/// Store of revoked token IDs
///
/// Each entry lives until the token it revokes would have expired; after
/// that `purge_expired` may drop it. Implementations must be safe to share
/// across tasks and across service instances pointed at the same backend.
///
/// # Atomicity
/// `try_revoke` is the conditional write that guards refresh-token rotation:
/// when several callers race to revoke the same ID, exactly one of them
/// observes `true`.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Insert an entry if none exists for `unique_id`
    ///
    /// # Arguments
    /// * `unique_id` - Token ID (`jti`) to revoke
    /// * `expires_at` - Original expiry of the token
    ///
    /// # Returns
    /// * `Ok(true)` - This call inserted the entry
    /// * `Ok(false)` - The ID was already revoked
    /// * `Err(StoreError)` - Nothing was written
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use tg_core::repositories::RevocationStore;
    /// # async fn example(store: &dyn RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// let expires_at = Utc::now() + chrono::Duration::days(7);
    ///
    /// if store.try_revoke("0d6f2b1c-jti", expires_at).await? {
    ///     println!("Revoked");
    /// } else {
    ///     println!("Someone else revoked it first");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn try_revoke(&self, unique_id: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError>;

    /// Revoke `unique_id`; revoking twice is a no-op
    async fn revoke(&self, unique_id: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.try_revoke(unique_id, expires_at).await.map(|_| ())
    }

    /// Check whether `unique_id` has been revoked
    async fn is_revoked(&self, unique_id: &str) -> Result<bool, StoreError>;

    /// Drop entries whose `expires_at` is strictly before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(StoreError)` - Purge failed; entries are left in place
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;
}

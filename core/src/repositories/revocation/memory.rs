//! Process-local revocation store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use crate::errors::StoreError;

use super::r#trait::RevocationStore;

#[derive(Debug, Default)]
struct Entries {
    by_id: HashMap<String, DateTime<Utc>>,
    by_expiry: BTreeSet<(DateTime<Utc>, String)>,
}

/// In-memory revocation store
///
/// Entries are indexed by expiry so a purge only touches what it removes.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<Entries>,
}

impl InMemoryRevocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.by_id.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.entries.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn try_revoke(&self, unique_id: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;

        if entries.by_id.contains_key(unique_id) {
            return Ok(false);
        }

        entries.by_id.insert(unique_id.to_string(), expires_at);
        entries.by_expiry.insert((expires_at, unique_id.to_string()));
        Ok(true)
    }

    async fn is_revoked(&self, unique_id: &str) -> Result<bool, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.by_id.contains_key(unique_id))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;

        // Everything ordered before (now, "") has expires_at < now
        let keep = entries.by_expiry.split_off(&(now, String::new()));
        let expired = std::mem::replace(&mut entries.by_expiry, keep);

        for (_, unique_id) in &expired {
            entries.by_id.remove(unique_id);
        }

        Ok(expired.len())
    }
}

//! Shared fixtures and store doubles for token service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::clock::ManualClock;
use crate::errors::StoreError;
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::token::{TokenService, TokenServiceConfig};

pub const TEST_SECRET: &str = "unit-test-secret-with-at-least-32-bytes!";
pub const ACCESS_TTL: i64 = 900;
pub const REFRESH_TTL: i64 = 86_400;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::default()
        .with_secret(TEST_SECRET)
        .with_expiry(ACCESS_TTL, REFRESH_TTL)
        .with_store_timeout(Duration::from_millis(200))
}

pub struct Harness<S: RevocationStore + ?Sized> {
    pub service: Arc<TokenService<S>>,
    pub clock: Arc<ManualClock>,
    pub store: Arc<S>,
}

pub fn harness_with<S: RevocationStore + 'static>(store: S) -> Harness<S> {
    let store = Arc::new(store);
    let clock = Arc::new(ManualClock::new(start()));
    let service = TokenService::with_clock(Arc::clone(&store), clock.clone(), test_config()).unwrap();
    Harness {
        service: Arc::new(service),
        clock,
        store,
    }
}

pub fn harness() -> Harness<InMemoryRevocationStore> {
    harness_with(InMemoryRevocationStore::new())
}

/// Flip one bit inside the MAC bytes and re-encode the tag
pub fn flip_signature_bit(token: &str) -> String {
    let (payload, tag) = token.split_once('.').unwrap();
    let mut raw = URL_SAFE_NO_PAD.decode(tag).unwrap();
    raw[5] ^= 0x01;
    format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(raw))
}

/// Counts calls and delegates to an in-memory store
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryRevocationStore,
    pub calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RevocationStore for CountingStore {
    async fn try_revoke(&self, unique_id: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.try_revoke(unique_id, expires_at).await
    }

    async fn is_revoked(&self, unique_id: &str) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.is_revoked(unique_id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.purge_expired(now).await
    }
}

/// Fails every call with a backend error
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("connection refused"))
    }
}

#[async_trait]
impl RevocationStore for FailingStore {
    async fn try_revoke(&self, _unique_id: &str, _expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        self.fail()
    }

    async fn is_revoked(&self, _unique_id: &str) -> Result<bool, StoreError> {
        self.fail()
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        self.fail()
    }
}

/// Sleeps far longer than the service timeout before answering
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl RevocationStore for SlowStore {
    async fn try_revoke(&self, _unique_id: &str, _expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }

    async fn is_revoked(&self, _unique_id: &str) -> Result<bool, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(false)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }
}

/// Reports every token as live but loses every conditional write, as when
/// another instance rotated the token between the check and the write
#[derive(Default)]
pub struct LostRaceStore {
    pub try_revoke_calls: AtomicUsize,
}

impl LostRaceStore {
    pub fn try_revoke_calls(&self) -> usize {
        self.try_revoke_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RevocationStore for LostRaceStore {
    async fn try_revoke(&self, _unique_id: &str, _expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        self.try_revoke_calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }

    async fn is_revoked(&self, _unique_id: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        Ok(0)
    }
}
